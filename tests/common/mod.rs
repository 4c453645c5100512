//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_payback::calc::{EconomicParams, RoofSegment, Scenario};
use pv_payback::tables::{Orientation, Region};

/// Absolute tolerance for comparing derived floats.
pub const EPS: f64 = 1e-9;

/// Reference two-roof scenario (5 kWp south 30°, 3 kWp east/west 25°, central).
pub fn reference_scenario() -> Scenario {
    Scenario {
        region: Region::Central,
        roofs: vec![
            RoofSegment::new(5.0, Orientation::South, 30.0),
            RoofSegment::new(3.0, Orientation::EastWest, 25.0),
        ],
        economics: reference_economics(),
    }
}

/// Reference economics (30 % base self-use, 70 % day share, 5 kWh storage).
pub fn reference_economics() -> EconomicParams {
    EconomicParams {
        self_use_percent: 30.0,
        day_share_percent: 70.0,
        electricity_price: 0.35,
        feed_in_tariff: 0.08,
        storage_capacity_kwh: 5.0,
        system_cost: 12000.0,
        storage_cost: 6000.0,
    }
}

pub fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < EPS,
        "{what}: expected {expected}, got {actual}"
    );
}
