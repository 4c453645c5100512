//! Savings, feed-in revenue and payback from yield and self-use split.

use super::types::{EconomicParams, Payback};

/// Annual money flows and payback for one installation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Economics {
    /// Energy consumed on-site (kWh).
    pub self_used_energy: f64,
    /// Energy exported (kWh).
    pub fed_in_energy: f64,
    /// Avoided grid purchases.
    pub saving: f64,
    /// Feed-in income.
    pub feed_in_revenue: f64,
    /// `saving + feed_in_revenue`.
    pub total_revenue: f64,
    /// `system_cost + storage_cost`.
    pub total_cost: f64,
    pub payback: Payback,
}

impl Economics {
    /// Splits `total_yield` by `self_use_fraction` and prices both parts.
    ///
    /// # Arguments
    ///
    /// * `total_yield` - Annual generation (kWh)
    /// * `self_use_fraction` - Share consumed on-site (0.0 to 1.0)
    /// * `params` - Tariffs and costs
    pub fn from_yield(total_yield: f64, self_use_fraction: f64, params: &EconomicParams) -> Self {
        let self_used_energy = total_yield * self_use_fraction;
        let fed_in_energy = total_yield - self_used_energy;

        let saving = self_used_energy * params.electricity_price;
        let feed_in_revenue = fed_in_energy * params.feed_in_tariff;
        let total_revenue = saving + feed_in_revenue;
        let total_cost = params.system_cost + params.storage_cost;

        Self {
            self_used_energy,
            fed_in_energy,
            saving,
            feed_in_revenue,
            total_revenue,
            total_cost,
            payback: payback(total_cost, total_revenue),
        }
    }
}

/// `total_cost / total_revenue` when revenue is positive, otherwise `Never`.
pub fn payback(total_cost: f64, total_revenue: f64) -> Payback {
    if total_revenue > 0.0 {
        Payback::Years(total_cost / total_revenue)
    } else {
        Payback::Never
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_prices_energy() {
        let params = EconomicParams::default();
        let e = Economics::from_yield(7700.0, 0.315, &params);
        assert!((e.self_used_energy - 2425.5).abs() < 1e-9);
        assert!((e.fed_in_energy - 5274.5).abs() < 1e-9);
        assert!((e.saving - 848.925).abs() < 1e-9);
        assert!((e.feed_in_revenue - 421.96).abs() < 1e-9);
        assert!((e.total_revenue - 1270.885).abs() < 1e-9);
        assert_eq!(e.total_cost, 18000.0);
        match e.payback {
            Payback::Years(y) => assert!((y - 14.163).abs() < 1e-3),
            Payback::Never => panic!("revenue is positive"),
        }
    }

    #[test]
    fn zero_tariffs_never_pay_back() {
        let params = EconomicParams {
            electricity_price: 0.0,
            feed_in_tariff: 0.0,
            ..EconomicParams::default()
        };
        let e = Economics::from_yield(7700.0, 0.315, &params);
        assert_eq!(e.total_revenue, 0.0);
        assert_eq!(e.payback, Payback::Never);
    }

    #[test]
    fn negative_revenue_never_pays_back() {
        assert_eq!(payback(1000.0, -5.0), Payback::Never);
    }

    #[test]
    fn payback_is_exact_quotient() {
        assert_eq!(payback(18000.0, 1200.0), Payback::Years(18000.0 / 1200.0));
    }

    #[test]
    fn full_self_use_exports_nothing() {
        let e = Economics::from_yield(1000.0, 1.0, &EconomicParams::default());
        assert_eq!(e.fed_in_energy, 0.0);
        assert_eq!(e.feed_in_revenue, 0.0);
    }
}
