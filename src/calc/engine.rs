//! Calculation pipeline: yield → self-consumption → economics.

use tracing::debug;

use crate::tables::{Region, UnknownKey};

use super::economics::Economics;
use super::self_consumption::{DayNightModel, SelfConsumptionModel};
use super::types::{EconomicParams, ResultSet, RoofSegment, Scenario};
use super::yield_calc::{total_yield, yield_per_roof};

/// Stateless calculator parameterised by its self-consumption model.
///
/// Generic over `M` for static dispatch; every call allocates a fresh
/// [`ResultSet`] and reads nothing but its arguments.
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator<M: SelfConsumptionModel> {
    model: M,
}

impl<M: SelfConsumptionModel> Calculator<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    /// Runs the full pipeline for one parameter set.
    ///
    /// # Arguments
    ///
    /// * `params` - Economic inputs
    /// * `roofs` - Roof segments in display order
    /// * `region` - Installation region
    pub fn compute(&self, params: &EconomicParams, roofs: &[RoofSegment], region: Region) -> ResultSet {
        let yield_per_roof = yield_per_roof(roofs, region);
        let total_yield = total_yield(&yield_per_roof);

        let self_use_fraction = self.model.self_use_fraction(params);
        let econ = Economics::from_yield(total_yield, self_use_fraction, params);

        debug!(
            model = self.model.name(),
            roofs = roofs.len(),
            total_yield,
            self_use_fraction,
            payback_years = econ.payback.as_f64(),
            "computed result set"
        );

        ResultSet {
            yield_per_roof,
            total_yield,
            self_use_model: self.model.name(),
            self_use_fraction,
            self_used_energy: econ.self_used_energy,
            fed_in_energy: econ.fed_in_energy,
            saving: econ.saving,
            feed_in_revenue: econ.feed_in_revenue,
            total_revenue: econ.total_revenue,
            total_cost: econ.total_cost,
            payback: econ.payback,
        }
    }

    /// Runs the pipeline on a validated [`Scenario`].
    pub fn compute_scenario(&self, scenario: &Scenario) -> ResultSet {
        self.compute(&scenario.economics, &scenario.roofs, scenario.region)
    }
}

/// Computes results with the canonical day/night self-consumption model.
pub fn compute(params: &EconomicParams, roofs: &[RoofSegment], region: Region) -> ResultSet {
    Calculator::new(DayNightModel).compute(params, roofs, region)
}

/// Like [`compute`], with the region given by name.
///
/// # Errors
///
/// Returns [`UnknownKey`] if `region` is not a known region.
pub fn compute_named(
    params: &EconomicParams,
    roofs: &[RoofSegment],
    region: &str,
) -> Result<ResultSet, UnknownKey> {
    let region: Region = region.parse()?;
    Ok(compute(params, roofs, region))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::self_consumption::{FlatModel, SelfUseModel};
    use crate::calc::types::Payback;

    #[test]
    fn reference_scenario() {
        let s = Scenario::default();
        let r = compute(&s.economics, &s.roofs, s.region);
        assert_eq!(r.yield_per_roof.len(), 2);
        assert!((r.yield_per_roof[0] - 5000.0).abs() < 1e-9);
        assert!((r.yield_per_roof[1] - 2700.0).abs() < 1e-9);
        assert!((r.total_yield - 7700.0).abs() < 1e-9);
        assert!((r.self_use_fraction - 0.315).abs() < 1e-12);
        assert_eq!(r.self_use_model, "day_night");
        assert!((r.payback.as_f64() - 14.163).abs() < 1e-3);
    }

    #[test]
    fn compute_is_bit_identical_on_repeat() {
        let s = Scenario::default();
        let a = compute(&s.economics, &s.roofs, s.region);
        let b = compute(&s.economics, &s.roofs, s.region);
        assert_eq!(a, b);
        assert_eq!(a.payback.as_f64().to_bits(), b.payback.as_f64().to_bits());
    }

    #[test]
    fn flat_model_changes_fraction_only() {
        let s = Scenario::default();
        let day_night = Calculator::new(DayNightModel).compute_scenario(&s);
        let flat = Calculator::new(FlatModel).compute_scenario(&s);
        assert_eq!(day_night.total_yield, flat.total_yield);
        assert_eq!(flat.self_use_model, "flat");
        assert!((flat.self_use_fraction - 0.45).abs() < 1e-12);
    }

    #[test]
    fn enum_model_matches_concrete_model() {
        let s = Scenario::default();
        let concrete = Calculator::new(DayNightModel).compute_scenario(&s);
        let selected = Calculator::new(SelfUseModel::DayNight).compute_scenario(&s);
        assert_eq!(concrete, selected);
    }

    #[test]
    fn named_region_lookup() {
        let s = Scenario::default();
        let by_name = compute_named(&s.economics, &s.roofs, "Mitteldeutschland");
        assert_eq!(by_name, Ok(compute(&s.economics, &s.roofs, Region::Central)));

        let err = compute_named(&s.economics, &s.roofs, "Nowhere").unwrap_err();
        assert_eq!(err.table, "region");
    }

    #[test]
    fn empty_installation_never_pays_back() {
        let r = compute(&EconomicParams::default(), &[], Region::South);
        assert_eq!(r.total_yield, 0.0);
        assert_eq!(r.payback, Payback::Never);
    }
}
