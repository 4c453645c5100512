//! Self-consumption models: which share of generation is used on-site.

use serde::{Deserialize, Serialize};

use super::types::EconomicParams;

/// Storage size at which the battery bonus saturates (kWh).
pub const STORAGE_SATURATION_KWH: f64 = 10.0;

/// Maximum absolute self-use bonus a saturated battery adds.
pub const MAX_STORAGE_BONUS: f64 = 0.3;

/// The same bonus expressed in percentage points, as the flat model uses it.
const MAX_STORAGE_BONUS_PERCENT: f64 = 30.0;

/// Strategy mapping economic inputs to a self-use fraction in `[0, 1]`.
pub trait SelfConsumptionModel {
    /// Fraction of generated energy consumed on-site.
    fn self_use_fraction(&self, params: &EconomicParams) -> f64;

    /// Short identifier used in reports and configuration.
    fn name(&self) -> &'static str;
}

/// Diminishing-returns battery effect, 0 at no storage and 1 from 10 kWh up.
///
/// Negative capacities count as no storage.
pub fn storage_effect(storage_capacity_kwh: f64) -> f64 {
    (storage_capacity_kwh / STORAGE_SATURATION_KWH).clamp(0.0, 1.0)
}

/// Day/night aware model.
///
/// The storage bonus is added to the base self-use rate, then scaled by the
/// share of consumption that coincides with generation:
/// `min((base + effect × 0.3) × day_share, 1)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DayNightModel;

impl SelfConsumptionModel for DayNightModel {
    fn self_use_fraction(&self, params: &EconomicParams) -> f64 {
        let base = params.self_use_percent / 100.0;
        let day_share = params.day_share_percent / 100.0;
        let effect = storage_effect(params.storage_capacity_kwh);
        ((base + effect * MAX_STORAGE_BONUS) * day_share).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "day_night"
    }
}

/// Flat-percentage model ignoring the day/night split:
/// `min(percent + effect × 30, 100) / 100`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FlatModel;

impl SelfConsumptionModel for FlatModel {
    fn self_use_fraction(&self, params: &EconomicParams) -> f64 {
        let effect = storage_effect(params.storage_capacity_kwh);
        let percent = (params.self_use_percent + effect * MAX_STORAGE_BONUS_PERCENT).min(100.0);
        (percent / 100.0).clamp(0.0, 1.0)
    }

    fn name(&self) -> &'static str {
        "flat"
    }
}

/// Configuration-selectable model.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfUseModel {
    #[default]
    DayNight,
    Flat,
}

impl SelfUseModel {
    /// Available model names.
    pub const NAMES: &[&str] = &["day_night", "flat"];

    /// Parses a model name as used on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "day_night" => Some(Self::DayNight),
            "flat" => Some(Self::Flat),
            _ => None,
        }
    }
}

impl SelfConsumptionModel for SelfUseModel {
    fn self_use_fraction(&self, params: &EconomicParams) -> f64 {
        match self {
            Self::DayNight => DayNightModel.self_use_fraction(params),
            Self::Flat => FlatModel.self_use_fraction(params),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::DayNight => DayNightModel.name(),
            Self::Flat => FlatModel.name(),
        }
    }
}
