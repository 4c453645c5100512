//! Yield and economics calculation pipeline.

pub mod economics;
pub mod engine;
/// Self-consumption strategies.
pub mod self_consumption;
pub mod types;
/// Per-roof and aggregate annual yield.
pub mod yield_calc;

pub use engine::{Calculator, compute, compute_named};
pub use self_consumption::{DayNightModel, FlatModel, SelfConsumptionModel, SelfUseModel};
pub use types::{EconomicParams, Payback, ResultSet, RoofSegment, Scenario};
