//! Per-field validation and coercion of raw form input.
//!
//! Validation is local to one field: no cross-field checks, no range checks.
//! A failed validation records an error but never blocks computation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::tables::UnknownKey;

/// Part of a roof segment addressed by a `roof<N>_*` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoofPart {
    Capacity,
    Orientation,
    Tilt,
}

/// An editable input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// A property of the roof segment at the given zero-based index.
    Roof(usize, RoofPart),
    Region,
    SelfUsePercent,
    DayNightSplit,
    ElectricityPrice,
    FeedInTariff,
    StorageCapacity,
    SystemCost,
    StorageCost,
}

/// Whether a field is free-text numeric or chosen from a fixed table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Numeric,
    Enumerated,
}

impl Field {
    /// Non-roof fields in display order.
    pub const GLOBAL: [Field; 8] = [
        Field::Region,
        Field::SelfUsePercent,
        Field::DayNightSplit,
        Field::ElectricityPrice,
        Field::FeedInTariff,
        Field::StorageCapacity,
        Field::SystemCost,
        Field::StorageCost,
    ];

    /// The three fields of roof segment `index` (zero-based).
    pub fn roof(index: usize) -> [Field; 3] {
        [
            Field::Roof(index, RoofPart::Capacity),
            Field::Roof(index, RoofPart::Orientation),
            Field::Roof(index, RoofPart::Tilt),
        ]
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Roof(_, RoofPart::Orientation) | Field::Region => FieldKind::Enumerated,
            _ => FieldKind::Numeric,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Roof(i, part) => {
                let suffix = match part {
                    RoofPart::Capacity => "kwp",
                    RoofPart::Orientation => "orientation",
                    RoofPart::Tilt => "tilt",
                };
                write!(f, "roof{}_{suffix}", i + 1)
            }
            Field::Region => f.write_str("region"),
            Field::SelfUsePercent => f.write_str("self_use_percent"),
            Field::DayNightSplit => f.write_str("day_night_split"),
            Field::ElectricityPrice => f.write_str("electricity_price"),
            Field::FeedInTariff => f.write_str("feed_in_tariff"),
            Field::StorageCapacity => f.write_str("storage_capacity"),
            Field::SystemCost => f.write_str("system_cost"),
            Field::StorageCost => f.write_str("storage_cost"),
        }
    }
}

impl FromStr for Field {
    type Err = UnknownKey;

    /// Parses `roof<N>_kwp|orientation|tilt` (N >= 1) and the global field names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownKey::new("field", s);

        if let Some(rest) = s.strip_prefix("roof") {
            let (num, suffix) = rest.split_once('_').ok_or_else(unknown)?;
            let n: usize = num.parse().map_err(|_| unknown())?;
            if n == 0 {
                return Err(unknown());
            }
            let part = match suffix {
                "kwp" => RoofPart::Capacity,
                "orientation" => RoofPart::Orientation,
                "tilt" => RoofPart::Tilt,
                _ => return Err(unknown()),
            };
            return Ok(Field::Roof(n - 1, part));
        }

        Field::GLOBAL
            .into_iter()
            .find(|f| f.to_string() == s)
            .ok_or_else(unknown)
    }
}

/// Why a field's raw input was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The field is empty.
    #[error("input required")]
    Required,
    /// A numeric field holds text that is not a finite number.
    #[error("numbers only")]
    NotANumber,
    /// An enumerated field holds a value outside its table.
    #[error("{0}")]
    UnknownKey(String),
}

impl From<UnknownKey> for FieldError {
    fn from(err: UnknownKey) -> Self {
        FieldError::UnknownKey(err.to_string())
    }
}

/// Current value of a field after validation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Empty input, kept so the field does not vanish from the form.
    Empty,
    /// Rejected raw text, kept verbatim.
    Invalid(String),
    Number(f64),
    /// Selection for an enumerated field, not yet resolved against its table.
    Choice(String),
}

/// Outcome of validating one raw edit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldUpdate {
    pub value: FieldValue,
    /// `None` clears any earlier error for the field.
    pub error: Option<FieldError>,
}

/// Validates `raw` for a known field.
pub fn validate(field: Field, raw: &str) -> FieldUpdate {
    if raw.is_empty() {
        return FieldUpdate {
            value: FieldValue::Empty,
            error: Some(FieldError::Required),
        };
    }

    match field.kind() {
        FieldKind::Enumerated => FieldUpdate {
            value: FieldValue::Choice(raw.to_string()),
            error: None,
        },
        FieldKind::Numeric => match parse_number(raw) {
            Some(n) => FieldUpdate {
                value: FieldValue::Number(n),
                error: None,
            },
            None => FieldUpdate {
                value: FieldValue::Invalid(raw.to_string()),
                error: Some(FieldError::NotANumber),
            },
        },
    }
}

/// Validates `raw` for a field given by name.
///
/// # Errors
///
/// Returns [`UnknownKey`] if `name` is not a field name.
pub fn validate_field(name: &str, raw: &str) -> Result<FieldUpdate, UnknownKey> {
    let field: Field = name.parse()?;
    Ok(validate(field, raw))
}

/// Parses a finite decimal number, tolerating surrounding whitespace and a
/// single decimal comma (`"5,0"`).
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let normalized;
    let text = if !trimmed.contains('.') && trimmed.matches(',').count() == 1 {
        normalized = trimmed.replace(',', ".");
        normalized.as_str()
    } else {
        trimmed
    };

    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
