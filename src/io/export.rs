//! CSV export for computed result sets.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::calc::types::ResultSet;
use crate::report::{energy, money, percent, years};

/// Column header for CSV result export.
const HEADER: [&str; 3] = ["metric", "value", "unit"];

/// Exports a result set to a CSV file at the given path.
///
/// Writes a header row followed by one `metric,value,unit` row per result,
/// using the display precisions. Produces deterministic output for
/// identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(result: &ResultSet, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(result, buf)
}

/// Writes a result set as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(result: &ResultSet, writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER)?;

    for (i, y) in result.yield_per_roof.iter().enumerate() {
        wtr.write_record([format!("yield_roof{}", i + 1), energy(*y), "kWh".to_string()])?;
    }

    let rows = [
        ("total_yield", energy(result.total_yield), "kWh"),
        ("self_use_share", percent(result.self_use_fraction), "%"),
        ("self_used_energy", energy(result.self_used_energy), "kWh"),
        ("fed_in_energy", energy(result.fed_in_energy), "kWh"),
        ("saving", money(result.saving), "currency"),
        ("feed_in_revenue", money(result.feed_in_revenue), "currency"),
        ("total_revenue", money(result.total_revenue), "currency"),
        ("total_cost", money(result.total_cost), "currency"),
        ("payback", years(result.payback), "years"),
    ];
    for (metric, value, unit) in rows {
        wtr.write_record([metric, value.as_str(), unit])?;
    }

    wtr.flush()?;
    Ok(())
}
