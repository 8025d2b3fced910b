//! Cross-station temporal pairing.
//!
//! Two stations observe the same meteor with unsynchronized frame clocks.
//! For triangulation, each point of the first station is matched to the
//! closest-in-time point of the second, and the pair is kept only when the
//! clocks agree to within a tolerance. Points without a partner are
//! dropped silently; lossy alignment is expected, not an error.

use crate::equatorial::EquatorialPoint;
use crate::time::SECONDS_PER_DAY;
use tracing::debug;

/// Two observations judged to represent the same physical instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPair {
    /// The point from the first station.
    pub first: EquatorialPoint,
    /// The matched point from the second station.
    pub second: EquatorialPoint,
    /// Absolute clock difference between the two points in seconds.
    pub dt_seconds: f64,
}

/// Match each point of `first` against the closest-in-time point of
/// `second`.
///
/// A pair is accepted only when the minimum time difference is strictly
/// below `max_dt_seconds`. The search is seeded from the previous match
/// index but still scans the whole of `second` for every point, so matches
/// need not be monotonic in the second station's ordering.
pub fn pair_points(
    first: &[EquatorialPoint],
    second: &[EquatorialPoint],
    max_dt_seconds: f64,
) -> Vec<PointPair> {
    let max_dt = max_dt_seconds / SECONDS_PER_DAY;

    let mut pairs = Vec::new();
    if second.is_empty() {
        return pairs;
    }

    let mut min_index = 0;
    for point in first {
        let mut min_diff = (point.julian_date - second[min_index].julian_date).abs();

        for (index, candidate) in second.iter().enumerate() {
            let diff = (point.julian_date - candidate.julian_date).abs();
            if diff < min_diff {
                min_index = index;
                min_diff = diff;
            }
        }

        if min_diff < max_dt {
            let dt_seconds = min_diff * SECONDS_PER_DAY;
            debug!(
                first_jd = point.julian_date,
                second_jd = second[min_index].julian_date,
                dt_seconds,
                "paired points"
            );
            pairs.push(PointPair {
                first: *point,
                second: second[min_index],
                dt_seconds,
            });
        }
    }

    debug!(
        candidates = first.len(),
        paired = pairs.len(),
        "station pairing complete"
    );
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(jd_offset_seconds: f64) -> EquatorialPoint {
        EquatorialPoint {
            julian_date: 2455597.0 + jd_offset_seconds / SECONDS_PER_DAY,
            ra: 120.0,
            dec: 30.0,
        }
    }

    #[test]
    fn exact_twins_pair_in_order() {
        let first: Vec<_> = (0..5).map(|i| point(i as f64 * 0.04)).collect();
        let second = first.clone();

        let pairs = pair_points(&first, &second, 2.0);
        assert_eq!(pairs.len(), 5);
        for (pair, original) in pairs.iter().zip(&first) {
            assert_eq!(pair.first, *original);
            assert_eq!(pair.second, *original);
            assert_eq!(pair.dt_seconds, 0.0);
        }
    }

    #[test]
    fn picks_nearest_in_time() {
        let first = vec![point(1.0)];
        let second = vec![point(0.0), point(0.9), point(2.5)];

        let pairs = pair_points(&first, &second, 2.0);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].second, second[1]);
        // Julian dates resolve differences only to tens of microseconds.
        assert!((pairs[0].dt_seconds - 0.1).abs() < 1e-3);
    }

    #[test]
    fn threshold_is_strict() {
        // Julian dates chosen so the difference is bit-exactly the
        // converted threshold.
        let at = |jd: f64| EquatorialPoint { julian_date: jd, ra: 120.0, dec: 30.0 };
        let first = vec![at(0.0)];
        let second = vec![at(2.0 / SECONDS_PER_DAY)];

        assert!(pair_points(&first, &second, 2.0).is_empty());
        assert_eq!(pair_points(&first, &second, 2.0 + 1e-6).len(), 1);
    }

    #[test]
    fn unmatched_points_dropped() {
        let first = vec![point(0.0), point(50.0), point(0.08)];
        let second = vec![point(0.0), point(0.08)];

        let pairs = pair_points(&first, &second, 2.0);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].first, first[0]);
        assert_eq!(pairs[1].first, first[2]);
    }

    #[test]
    fn matches_need_not_be_monotonic() {
        // The second station's points arrive out of order.
        let first = vec![point(0.0), point(1.0)];
        let second = vec![point(1.1), point(0.1)];

        let pairs = pair_points(&first, &second, 2.0);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].second, second[1]);
        assert_eq!(pairs[1].second, second[0]);
    }

    #[test]
    fn empty_second_station_yields_no_pairs() {
        let first = vec![point(0.0)];
        assert!(pair_points(&first, &[], 2.0).is_empty());
    }
}
