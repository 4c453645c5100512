//! Core calculation types: roof segments, economic inputs and the result set.

use serde::{Deserialize, Serialize};

use crate::tables::{Orientation, Region};

/// One contiguous PV array on a single roof face.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RoofSegment {
    /// Nameplate capacity (kWp, >= 0).
    pub capacity_kwp: f64,
    /// Compass heading of the roof face.
    pub orientation: Orientation,
    /// Panel tilt from horizontal (degrees).
    pub tilt_deg: f64,
}

impl RoofSegment {
    pub fn new(capacity_kwp: f64, orientation: Orientation, tilt_deg: f64) -> Self {
        Self {
            capacity_kwp,
            orientation,
            tilt_deg,
        }
    }
}

/// Tariffs, consumption profile, storage and cost inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EconomicParams {
    /// Share of generation consumed on-site without storage (percent, 0-100).
    pub self_use_percent: f64,
    /// Share of household consumption occurring during daylight (percent, 0-100).
    pub day_share_percent: f64,
    /// Grid electricity price per kWh.
    pub electricity_price: f64,
    /// Feed-in tariff paid per exported kWh.
    pub feed_in_tariff: f64,
    /// Usable battery capacity (kWh, >= 0).
    pub storage_capacity_kwh: f64,
    /// Installed cost of the PV system.
    pub system_cost: f64,
    /// Installed cost of the battery.
    pub storage_cost: f64,
}

impl Default for EconomicParams {
    fn default() -> Self {
        Self {
            self_use_percent: 30.0,
            day_share_percent: 70.0,
            electricity_price: 0.35,
            feed_in_tariff: 0.08,
            storage_capacity_kwh: 5.0,
            system_cost: 12000.0,
            storage_cost: 6000.0,
        }
    }
}

/// A fully typed parameter set, ready for the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub region: Region,
    pub roofs: Vec<RoofSegment>,
    pub economics: EconomicParams,
}

impl Default for Scenario {
    /// The two-roof installation the original form was seeded with.
    fn default() -> Self {
        Self {
            region: Region::Central,
            roofs: vec![
                RoofSegment::new(5.0, Orientation::South, 30.0),
                RoofSegment::new(3.0, Orientation::EastWest, 25.0),
            ],
            economics: EconomicParams::default(),
        }
    }
}

/// Payback period, or `Never` when annual revenue is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Payback {
    Years(f64),
    Never,
}

impl Payback {
    /// Years as a float, with `Never` mapped to positive infinity.
    pub fn as_f64(self) -> f64 {
        match self {
            Payback::Years(y) => y,
            Payback::Never => f64::INFINITY,
        }
    }

    pub fn is_never(self) -> bool {
        matches!(self, Payback::Never)
    }
}

/// Everything the calculator derives from one scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSet {
    /// Annual yield per roof segment, in input order (kWh).
    pub yield_per_roof: Vec<f64>,
    /// Sum of `yield_per_roof` (kWh).
    pub total_yield: f64,
    /// Name of the self-consumption model used.
    pub self_use_model: &'static str,
    /// Fraction of generation consumed on-site (0.0 to 1.0).
    pub self_use_fraction: f64,
    /// Energy consumed on-site (kWh).
    pub self_used_energy: f64,
    /// Energy exported to the grid (kWh).
    pub fed_in_energy: f64,
    /// Avoided grid purchases per year.
    pub saving: f64,
    /// Feed-in income per year.
    pub feed_in_revenue: f64,
    /// `saving + feed_in_revenue`.
    pub total_revenue: f64,
    /// `system_cost + storage_cost`.
    pub total_cost: f64,
    /// `total_cost / total_revenue`, or `Never`.
    pub payback: Payback,
}
