//! Annual energy yield per roof segment and in aggregate.

use crate::tables::{Region, tilt_factor};

use super::types::RoofSegment;

/// Annual yield of a single roof segment (kWh).
///
/// `capacity × regional yield × orientation factor × tilt factor`.
pub fn roof_yield(segment: &RoofSegment, region: Region) -> f64 {
    segment.capacity_kwp
        * region.yield_kwh_per_kwp()
        * segment.orientation.factor()
        * tilt_factor(segment.tilt_deg)
}

/// Per-segment yields in input order.
pub fn yield_per_roof(roofs: &[RoofSegment], region: Region) -> Vec<f64> {
    roofs.iter().map(|r| roof_yield(r, region)).collect()
}

/// Total annual yield (kWh) from the per-segment yields.
pub fn total_yield(yield_per_roof: &[f64]) -> f64 {
    yield_per_roof.iter().sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::Orientation;

    #[test]
    fn south_roof_at_optimal_tilt() {
        let roof = RoofSegment::new(5.0, Orientation::South, 30.0);
        assert_eq!(roof_yield(&roof, Region::Central), 5000.0);
    }

    #[test]
    fn east_west_roof_applies_orientation_factor() {
        let roof = RoofSegment::new(3.0, Orientation::EastWest, 25.0);
        assert!((roof_yield(&roof, Region::Central) - 2700.0).abs() < 1e-9);
    }

    #[test]
    fn north_roof_in_south_region_with_steep_tilt() {
        // 2 * 1100 * 0.7 * 0.9
        let roof = RoofSegment::new(2.0, Orientation::North, 70.0);
        assert!((roof_yield(&roof, Region::South) - 1386.0).abs() < 1e-9);
    }

    #[test]
    fn total_is_sum_of_segments() {
        let roofs = [
            RoofSegment::new(5.0, Orientation::South, 30.0),
            RoofSegment::new(3.0, Orientation::EastWest, 25.0),
        ];
        let per_roof = yield_per_roof(&roofs, Region::Central);
        assert_eq!(per_roof.len(), 2);
        assert!((total_yield(&per_roof) - 7700.0).abs() < 1e-9);
    }

    #[test]
    fn zero_capacity_segment_adds_nothing() {
        let roofs = vec![RoofSegment::new(4.0, Orientation::South, 15.0)];
        let mut extended = roofs.clone();
        extended.push(RoofSegment::new(0.0, Orientation::North, 5.0));
        assert_eq!(
            total_yield(&yield_per_roof(&roofs, Region::North)),
            total_yield(&yield_per_roof(&extended, Region::North))
        );
    }

    #[test]
    fn no_roofs_yield_nothing() {
        assert_eq!(total_yield(&[]), 0.0);
        assert!(yield_per_roof(&[], Region::South).is_empty());
    }
}
