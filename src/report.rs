//! Fixed-precision rendering of result sets.
//!
//! Energy is shown with 0 decimals (kWh), money with 2, percentages and
//! payback years with 1. Rounding follows JavaScript's `toFixed`, so exact
//! ties round away from zero (`2.5` → `3`), unlike Rust's `{:.0}`.

use std::fmt;

use crate::calc::types::{Payback, ResultSet};

/// Decimals for energy values (kWh).
pub const ENERGY_DECIMALS: usize = 0;
/// Decimals for monetary values.
pub const MONEY_DECIMALS: usize = 2;
/// Decimals for percentages and payback years.
pub const RATIO_DECIMALS: usize = 1;

/// Formats `value` with `digits` decimals using `toFixed` semantics.
///
/// Non-finite values render as `Infinity`, `-Infinity` or `NaN`; negative
/// zero renders without a sign. Magnitudes of `1e21` and above switch to
/// shortest exponent notation (`1.5e+21`) and ignore `digits`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return format!("{:.digits$}", 0.0);
    }
    if value.abs() >= 1e21 {
        return format!("{value:e}").replacen('e', "e+", 1);
    }

    // exact decimal expansion; every finite f64 terminates within 1074 places
    let exact = format!("{value:.1100}");
    let tail = exact
        .split_once('.')
        .map(|(_, frac)| &frac[digits.min(frac.len())..])
        .unwrap_or("");
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');

    if is_tie {
        let scale = 10f64.powi(digits as i32);
        let rounded = ((value.abs() * scale).floor() + 1.0).copysign(value) / scale;
        return format!("{rounded:.digits$}");
    }
    format!("{value:.digits$}")
}

/// Energy in kWh, 0 decimals.
pub fn energy(kwh: f64) -> String {
    to_fixed(kwh, ENERGY_DECIMALS)
}

/// Currency amount, 2 decimals.
pub fn money(amount: f64) -> String {
    to_fixed(amount, MONEY_DECIMALS)
}

/// Fraction in `[0, 1]` shown as a percentage, 1 decimal.
pub fn percent(fraction: f64) -> String {
    to_fixed(fraction * 100.0, RATIO_DECIMALS)
}

/// Payback period in years, 1 decimal, or `Infinity`.
pub fn years(payback: Payback) -> String {
    to_fixed(payback.as_f64(), RATIO_DECIMALS)
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&years(*self))
    }
}

impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Results ({}) ---", self.self_use_model)?;
        for (i, y) in self.yield_per_roof.iter().enumerate() {
            writeln!(f, "Annual yield roof {}:   {} kWh", i + 1, energy(*y))?;
        }
        writeln!(f, "Total yield:            {} kWh", energy(self.total_yield))?;
        writeln!(f, "Self-use share:         {} %", percent(self.self_use_fraction))?;
        writeln!(f, "Self-used energy:       {} kWh", energy(self.self_used_energy))?;
        writeln!(f, "Fed-in energy:          {} kWh", energy(self.fed_in_energy))?;
        writeln!(f, "Electricity saving:     {}", money(self.saving))?;
        writeln!(f, "Feed-in revenue:        {}", money(self.feed_in_revenue))?;
        writeln!(f, "Total revenue:          {}", money(self.total_revenue))?;
        writeln!(f, "Total cost:             {}", money(self.total_cost))?;
        write!(f, "Payback:                {} years", self.payback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_round_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(5274.5, 0), "5275");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
    }

    #[test]
    fn huge_values_use_exponent_notation() {
        assert_eq!(to_fixed(1e21, 2), "1e+21");
        assert_eq!(to_fixed(-1.5e22, 0), "-1.5e+22");
        assert_eq!(to_fixed(9.99e20, 0), "999000000000000000000");
    }

    #[test]
    fn non_ties_round_to_nearest() {
        assert_eq!(to_fixed(2425.4, 0), "2425");
        assert_eq!(to_fixed(848.925, 2), "848.92");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(14.1635, 1), "14.2");
        assert_eq!(to_fixed(31.5, 1), "31.5");
    }

    #[test]
    fn special_values() {
        assert_eq!(to_fixed(f64::INFINITY, 1), "Infinity");
        assert_eq!(to_fixed(f64::NEG_INFINITY, 1), "-Infinity");
        assert_eq!(to_fixed(f64::NAN, 2), "NaN");
        assert_eq!(to_fixed(-0.0, 1), "0.0");
        assert_eq!(to_fixed(0.0, 0), "0");
    }

    #[test]
    fn category_precisions() {
        assert_eq!(energy(7700.0), "7700");
        assert_eq!(money(421.96), "421.96");
        assert_eq!(percent(0.315), "31.5");
        assert_eq!(years(Payback::Years(14.1634)), "14.2");
        assert_eq!(years(Payback::Never), "Infinity");
    }

    #[test]
    fn result_set_display_lists_every_roof() {
        let r = ResultSet {
            yield_per_roof: vec![5000.0, 2700.0, 0.0],
            total_yield: 7700.0,
            self_use_model: "day_night",
            self_use_fraction: 0.315,
            self_used_energy: 2425.5,
            fed_in_energy: 5274.5,
            saving: 848.925,
            feed_in_revenue: 421.96,
            total_revenue: 1270.885,
            total_cost: 18000.0,
            payback: Payback::Never,
        };
        let s = r.to_string();
        assert!(s.contains("Annual yield roof 3:   0 kWh"));
        assert!(s.contains("Self-used energy:       2426 kWh"));
        assert!(s.contains("Fed-in energy:          5275 kWh"));
        assert!(s.contains("Payback:                Infinity years"));
    }
}
