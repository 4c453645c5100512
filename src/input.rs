//! Form input state as an immutable value with a pure edit transition.
//!
//! `InputState` pairs the current raw-ish value of every field with the
//! errors of the fields that failed validation, and remembers the last fully
//! valid parameter set so computation can carry on while the user types.

use std::collections::BTreeMap;

use thiserror::Error;
use tracing::debug;

use crate::calc::types::{RoofSegment, Scenario};
use crate::field::{Field, FieldError, FieldValue, RoofPart, validate};
use crate::tables::{Orientation, Region, UnknownKey};

/// One raw edit event: a field and the text now in it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldEdit {
    pub field: Field,
    pub raw: String,
}

impl FieldEdit {
    pub fn new(field: Field, raw: impl Into<String>) -> Self {
        Self {
            field,
            raw: raw.into(),
        }
    }

    /// Parses a `name=value` assignment.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKey`] if the text has no `=` or names no known field.
    pub fn parse_assignment(s: &str) -> Result<Self, UnknownKey> {
        let (name, raw) = s
            .split_once('=')
            .ok_or_else(|| UnknownKey::new("field", s))?;
        Ok(Self::new(name.trim().parse()?, raw))
    }
}

/// A strict snapshot was requested while some fields are invalid.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid input:{}", list_fields(.fields))]
pub struct InvalidInput {
    /// Every invalid field with its error, in field order.
    pub fields: Vec<(Field, FieldError)>,
}

fn list_fields(fields: &[(Field, FieldError)]) -> String {
    fields.iter().map(|(field, err)| format!(" {field} ({err});")).collect()
}

/// Values and errors of every form field.
#[derive(Debug, Clone, PartialEq)]
pub struct InputState {
    values: BTreeMap<Field, FieldValue>,
    errors: BTreeMap<Field, FieldError>,
    last_valid: Scenario,
}

impl Default for InputState {
    fn default() -> Self {
        Self::from_scenario(&Scenario::default())
    }
}

impl InputState {
    /// Seeds every field from a valid scenario.
    pub fn from_scenario(scenario: &Scenario) -> Self {
        let mut values = BTreeMap::new();
        for (i, roof) in scenario.roofs.iter().enumerate() {
            insert_roof(&mut values, i, roof);
        }

        let e = &scenario.economics;
        values.insert(Field::Region, FieldValue::Choice(scenario.region.key().to_string()));
        values.insert(Field::SelfUsePercent, FieldValue::Number(e.self_use_percent));
        values.insert(Field::DayNightSplit, FieldValue::Number(e.day_share_percent));
        values.insert(Field::ElectricityPrice, FieldValue::Number(e.electricity_price));
        values.insert(Field::FeedInTariff, FieldValue::Number(e.feed_in_tariff));
        values.insert(Field::StorageCapacity, FieldValue::Number(e.storage_capacity_kwh));
        values.insert(Field::SystemCost, FieldValue::Number(e.system_cost));
        values.insert(Field::StorageCost, FieldValue::Number(e.storage_cost));

        Self {
            values,
            errors: BTreeMap::new(),
            last_valid: scenario.clone(),
        }
    }

    /// Number of roof segments in the form.
    pub fn roof_count(&self) -> usize {
        self.last_valid.roofs.len()
    }

    pub fn value(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// All current field errors, in field order.
    pub fn errors(&self) -> impl Iterator<Item = (&Field, &FieldError)> {
        self.errors.iter()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Applies one edit and returns the next state.
    ///
    /// The edited field takes the validated value; its error is recorded or
    /// cleared. A valid edit also updates the last valid scenario.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownKey`] if the edit addresses a roof that does not exist.
    pub fn apply(mut self, edit: &FieldEdit) -> Result<Self, UnknownKey> {
        if let Field::Roof(i, _) = edit.field {
            if i >= self.roof_count() {
                return Err(UnknownKey::new("field", &edit.field.to_string()));
            }
        }

        let update = validate(edit.field, &edit.raw);
        let error = match update.error {
            Some(err) => Some(err),
            None => self.commit(edit.field, &update.value).err(),
        };

        self.values.insert(edit.field, update.value);
        match error {
            Some(err) => {
                debug!(field = %edit.field, raw = %edit.raw, error = %err, "field rejected");
                self.errors.insert(edit.field, err);
            }
            None => {
                self.errors.remove(&edit.field);
            }
        }
        Ok(self)
    }

    /// Appends a roof segment; its fields start out valid.
    pub fn push_roof(mut self, roof: RoofSegment) -> Self {
        let index = self.roof_count();
        insert_roof(&mut self.values, index, &roof);
        self.last_valid.roofs.push(roof);
        self
    }

    /// Removes the last roof segment together with its values and errors.
    /// The first roof is never removed.
    pub fn pop_roof(mut self) -> Self {
        let index = self.roof_count().saturating_sub(1);
        if index > 0 {
            for field in Field::roof(index) {
                self.values.remove(&field);
                self.errors.remove(&field);
            }
            self.last_valid.roofs.pop();
        }
        self
    }

    /// The parameter set built from the most recent valid value of each field.
    pub fn best_effort(&self) -> Scenario {
        self.last_valid.clone()
    }

    /// The current parameter set, only if every field is valid.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] listing each field that currently has an error.
    pub fn snapshot(&self) -> Result<Scenario, InvalidInput> {
        if self.errors.is_empty() {
            return Ok(self.last_valid.clone());
        }
        Err(InvalidInput {
            fields: self
                .errors
                .iter()
                .map(|(f, e)| (*f, e.clone()))
                .collect(),
        })
    }

    /// Writes a validated value into the last valid scenario.
    fn commit(&mut self, field: Field, value: &FieldValue) -> Result<(), FieldError> {
        let s = &mut self.last_valid;
        match (field, value) {
            (Field::Region, FieldValue::Choice(c)) => s.region = c.parse::<Region>()?,
            (Field::Roof(i, RoofPart::Orientation), FieldValue::Choice(c)) => {
                s.roofs[i].orientation = c.parse::<Orientation>()?;
            }
            (Field::Roof(i, RoofPart::Capacity), FieldValue::Number(n)) => s.roofs[i].capacity_kwp = *n,
            (Field::Roof(i, RoofPart::Tilt), FieldValue::Number(n)) => s.roofs[i].tilt_deg = *n,
            (Field::SelfUsePercent, FieldValue::Number(n)) => s.economics.self_use_percent = *n,
            (Field::DayNightSplit, FieldValue::Number(n)) => s.economics.day_share_percent = *n,
            (Field::ElectricityPrice, FieldValue::Number(n)) => s.economics.electricity_price = *n,
            (Field::FeedInTariff, FieldValue::Number(n)) => s.economics.feed_in_tariff = *n,
            (Field::StorageCapacity, FieldValue::Number(n)) => s.economics.storage_capacity_kwh = *n,
            (Field::SystemCost, FieldValue::Number(n)) => s.economics.system_cost = *n,
            (Field::StorageCost, FieldValue::Number(n)) => s.economics.storage_cost = *n,
            _ => {}
        }
        Ok(())
    }
}

/// Pure transition: `reduce(state, edit) -> state'`.
///
/// # Errors
///
/// Returns [`UnknownKey`] if the edit addresses a roof that does not exist.
pub fn reduce(state: &InputState, edit: &FieldEdit) -> Result<InputState, UnknownKey> {
    state.clone().apply(edit)
}

fn insert_roof(values: &mut BTreeMap<Field, FieldValue>, index: usize, roof: &RoofSegment) {
    let [kwp, orientation, tilt] = Field::roof(index);
    values.insert(kwp, FieldValue::Number(roof.capacity_kwp));
    values.insert(orientation, FieldValue::Choice(roof.orientation.key().to_string()));
    values.insert(tilt, FieldValue::Number(roof.tilt_deg));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(name: &str, raw: &str) -> FieldEdit {
        FieldEdit::new(name.parse().expect("field name should parse"), raw)
    }

    #[test]
    fn default_state_is_valid() {
        let state = InputState::default();
        assert!(!state.has_errors());
        assert_eq!(state.roof_count(), 2);
        assert_eq!(state.snapshot(), Ok(Scenario::default()));
    }

    #[test]
    fn valid_edit_updates_value_and_snapshot() {
        let state = InputState::default();
        let next = reduce(&state, &edit("roof1_kwp", "6,5")).unwrap();
        assert_eq!(next.value(Field::Roof(0, RoofPart::Capacity)), Some(&FieldValue::Number(6.5)));
        assert_eq!(next.snapshot().unwrap().roofs[0].capacity_kwp, 6.5);
        // the original is untouched
        assert_eq!(state.best_effort().roofs[0].capacity_kwp, 5.0);
    }

    #[test]
    fn empty_edit_records_required_and_keeps_last_valid() {
        let state = InputState::default();
        let next = reduce(&state, &edit("system_cost", "")).unwrap();
        assert_eq!(next.value(Field::SystemCost), Some(&FieldValue::Empty));
        assert_eq!(next.error(Field::SystemCost), Some(&FieldError::Required));
        assert_eq!(next.best_effort().economics.system_cost, 12000.0);
    }

    #[test]
    fn invalid_edit_blocks_strict_snapshot_only() {
        let state = InputState::default()
            .apply(&edit("feed_in_tariff", "cheap"))
            .unwrap();
        let err = state.snapshot().unwrap_err();
        assert_eq!(err.fields, vec![(Field::FeedInTariff, FieldError::NotANumber)]);
        assert_eq!(err.to_string(), "invalid input: feed_in_tariff (numbers only);");
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
        assert_eq!(state.best_effort().economics.feed_in_tariff, 0.08);
    }

    #[test]
    fn correcting_a_field_clears_its_error() {
        let state = InputState::default()
            .apply(&edit("electricity_price", "x"))
            .and_then(|s| s.apply(&edit("electricity_price", "0.40")))
            .unwrap();
        assert!(!state.has_errors());
        assert_eq!(state.snapshot().unwrap().economics.electricity_price, 0.40);
    }

    #[test]
    fn unknown_choice_is_recorded_as_unknown_key() {
        let state = InputState::default().apply(&edit("region", "Atlantis")).unwrap();
        assert!(matches!(state.error(Field::Region), Some(FieldError::UnknownKey(_))));
        assert_eq!(state.best_effort().region, Region::Central);
    }

    #[test]
    fn choice_edits_resolve_labels() {
        let state = InputState::default()
            .apply(&edit("region", "Süddeutschland"))
            .and_then(|s| s.apply(&edit("roof2_orientation", "Nord")))
            .unwrap();
        let s = state.snapshot().unwrap();
        assert_eq!(s.region, Region::South);
        assert_eq!(s.roofs[1].orientation, Orientation::North);
    }

    #[test]
    fn editing_missing_roof_fails() {
        let err = InputState::default().apply(&edit("roof3_kwp", "1")).unwrap_err();
        assert_eq!(err.key, "roof3_kwp");
    }

    #[test]
    fn push_and_pop_roofs() {
        let state = InputState::default().push_roof(RoofSegment::new(2.0, Orientation::North, 45.0));
        assert_eq!(state.roof_count(), 3);
        let state = state.apply(&edit("roof3_tilt", "oops")).unwrap();
        assert!(state.has_errors());

        let state = state.pop_roof();
        assert_eq!(state.roof_count(), 2);
        assert!(!state.has_errors());
        assert!(state.value(Field::Roof(2, RoofPart::Tilt)).is_none());

        let state = state.pop_roof().pop_roof();
        assert_eq!(state.roof_count(), 1);
        assert_eq!(state.best_effort().roofs.len(), 1);
    }

    #[test]
    fn parse_assignment() {
        let e = FieldEdit::parse_assignment("roof2_tilt=35").unwrap();
        assert_eq!(e.field, Field::Roof(1, RoofPart::Tilt));
        assert_eq!(e.raw, "35");

        let e = FieldEdit::parse_assignment("system_cost=").unwrap();
        assert_eq!(e.raw, "");

        assert!(FieldEdit::parse_assignment("system_cost").is_err());
        assert!(FieldEdit::parse_assignment("bogus=1").is_err());
    }
}
