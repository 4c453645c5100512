//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::calc::self_consumption::SelfUseModel;
use crate::calc::types::{EconomicParams, RoofSegment, Scenario};
use crate::input::InputState;
use crate::tables::{Orientation, Region};

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Installation region.
    #[serde(default = "default_region")]
    pub region: Region,
    /// Self-consumption model: `"day_night"` or `"flat"`.
    #[serde(default)]
    pub model: SelfUseModel,
    /// Roof segments in display order.
    #[serde(default = "default_roofs")]
    pub roofs: Vec<RoofSegment>,
    /// Tariffs, storage and costs.
    #[serde(default)]
    pub economics: EconomicParams,
}

fn default_region() -> Region {
    Scenario::default().region
}

fn default_roofs() -> Vec<RoofSegment> {
    Scenario::default().roofs
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field} — {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"economics.self_use_percent"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: the two-roof installation the form starts with.
    pub fn baseline() -> Self {
        let s = Scenario::default();
        Self {
            region: s.region,
            model: SelfUseModel::DayNight,
            roofs: s.roofs,
            economics: s.economics,
        }
    }

    /// Returns the baseline installation without a battery.
    pub fn no_storage() -> Self {
        Self {
            economics: EconomicParams {
                storage_capacity_kwh: 0.0,
                storage_cost: 0.0,
                ..EconomicParams::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns a single south-facing 8 kWp roof in the south region.
    pub fn single_south() -> Self {
        Self {
            region: Region::South,
            roofs: vec![RoofSegment::new(8.0, Orientation::South, 35.0)],
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "no_storage", "single_south"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "no_storage" => Ok(Self::no_storage()),
            "single_south" => Ok(Self::single_south()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if self.roofs.is_empty() {
            errors.push(ConfigError::new("roofs", "at least one roof is required"));
        }
        for (i, roof) in self.roofs.iter().enumerate() {
            if !(roof.capacity_kwp.is_finite() && roof.capacity_kwp >= 0.0) {
                errors.push(ConfigError::new(
                    format!("roofs[{i}].capacity_kwp"),
                    "must be a finite number >= 0",
                ));
            }
            if !(0.0..=90.0).contains(&roof.tilt_deg) {
                errors.push(ConfigError::new(
                    format!("roofs[{i}].tilt_deg"),
                    "must be in [0, 90]",
                ));
            }
        }

        let e = &self.economics;
        for (name, value) in [
            ("self_use_percent", e.self_use_percent),
            ("day_share_percent", e.day_share_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(ConfigError::new(format!("economics.{name}"), "must be in [0, 100]"));
            }
        }
        for (name, value) in [
            ("electricity_price", e.electricity_price),
            ("feed_in_tariff", e.feed_in_tariff),
            ("storage_capacity_kwh", e.storage_capacity_kwh),
            ("system_cost", e.system_cost),
            ("storage_cost", e.storage_cost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(
                    format!("economics.{name}"),
                    "must be a finite number >= 0",
                ));
            }
        }

        errors
    }

    /// The typed parameter set described by this configuration.
    pub fn scenario(&self) -> Scenario {
        Scenario {
            region: self.region,
            roofs: self.roofs.clone(),
            economics: self.economics,
        }
    }

    /// Seeds a form input state from this configuration.
    pub fn into_input_state(self) -> InputState {
        InputState::from_scenario(&self.scenario())
    }
}
