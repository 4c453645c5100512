//! Annual yield, self-consumption and payback estimator for multi-roof PV installations.

/// Yield, self-consumption and economics pipeline.
pub mod calc;
pub mod cli;
pub mod config;
/// Per-field validation of raw input.
pub mod field;
pub mod input;
pub mod io;
pub mod report;
/// Region, orientation and tilt lookup tables.
pub mod tables;
