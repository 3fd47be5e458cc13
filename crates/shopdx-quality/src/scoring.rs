//! Piecewise-linear threshold scoring
//!
//! | value band            | score    |
//! |-----------------------|----------|
//! | at or past excellent  | 100      |
//! | [good, excellent)     | 80 - 100 |
//! | [fair, good)          | 60 - 80  |
//! | [poor, fair)          | 30 - 60  |
//! | [danger, poor)        | 0 - 30   |
//! | worse than danger     | 0        |
//!
//! Lower-is-better metrics are scored by negating the value and every
//! boundary, which turns them into higher-is-better ones.

use shopdx_catalog::ThresholdSet;
use shopdx_core::Direction;

/// Score at the lower edge of each band, worst to best
const BAND_FLOORS: [f64; 5] = [0.0, 30.0, 60.0, 80.0, 100.0];

fn interpolate(value: f64, lo: f64, hi: f64, score_lo: f64, score_hi: f64) -> f64 {
    let width = hi - lo;
    if width <= 0.0 {
        return score_hi;
    }
    score_lo + (value - lo) / width * (score_hi - score_lo)
}

/// Score a metric value against its tiers, always within [0, 100]
pub fn score(value: f64, thresholds: &ThresholdSet) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }

    let (v, b) = match thresholds.direction {
        Direction::HigherIsBetter => (value, thresholds.boundaries()),
        Direction::LowerIsBetter => (-value, thresholds.boundaries().map(|x| -x)),
    };

    if v >= b[4] {
        return 100.0;
    }
    if v < b[0] {
        return 0.0;
    }

    // b[i] <= v < b[i + 1]
    let band = (0..4).rev().find(|&i| v >= b[i]).unwrap_or(0);
    interpolate(
        v,
        b[band],
        b[band + 1],
        BAND_FLOORS[band],
        BAND_FLOORS[band + 1],
    )
    .clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating() -> ThresholdSet {
        ThresholdSet::higher(4.0, 4.3, 4.6, 4.8, 4.9)
    }

    fn prep_time() -> ThresholdSet {
        ThresholdSet::lower(35.0, 25.0, 20.0, 15.0, 10.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    // ============================================================================
    // Boundaries
    // ============================================================================

    #[test]
    fn test_boundary_scores_higher() {
        let t = ThresholdSet::higher(10.0, 20.0, 30.0, 40.0, 50.0);
        assert_eq!(score(50.0, &t), 100.0);
        assert_eq!(score(70.0, &t), 100.0);
        assert!(approx(score(40.0, &t), 80.0));
        assert!(approx(score(30.0, &t), 60.0));
        assert!(approx(score(20.0, &t), 30.0));
        assert!(approx(score(10.0, &t), 0.0));
        assert_eq!(score(9.99, &t), 0.0);
    }

    #[test]
    fn test_boundary_scores_lower() {
        let t = prep_time();
        assert_eq!(score(10.0, &t), 100.0);
        assert_eq!(score(5.0, &t), 100.0);
        assert!(approx(score(15.0, &t), 80.0));
        assert!(approx(score(20.0, &t), 60.0));
        assert!(approx(score(25.0, &t), 30.0));
        assert!(approx(score(35.0, &t), 0.0));
        assert_eq!(score(60.0, &t), 0.0);
    }

    #[test]
    fn test_interpolation_within_band() {
        // halfway between fair (4.6) and good (4.8)
        assert!(approx(score(4.7, &rating()), 70.0));
        // prep time 24 min: poor band, 1/5 of the way from 25 to 20
        assert!(approx(score(24.0, &prep_time()), 36.0));
    }

    // ============================================================================
    // Properties
    // ============================================================================

    #[test]
    fn test_monotonic_higher_is_better() {
        let t = rating();
        let mut last = -1.0;
        for i in 0..=120 {
            let s = score(3.5 + i as f64 * 0.0125, &t);
            assert!(s >= last, "score dropped at step {i}");
            last = s;
        }
    }

    #[test]
    fn test_monotonic_lower_is_better() {
        let t = prep_time();
        let mut last = 101.0;
        for minutes in 0..=50 {
            let s = score(minutes as f64, &t);
            assert!(s <= last, "score rose at {minutes} min");
            last = s;
        }
    }

    #[test]
    fn test_score_always_in_range() {
        let t = ThresholdSet::lower(0.07, 0.04, 0.02, 0.01, 0.005);
        for v in [-1.0, 0.0, 0.003, 0.015, 0.5, 1e12, f64::MAX] {
            let s = score(v, &t);
            assert!((0.0..=100.0).contains(&s), "{v} -> {s}");
        }
    }

    #[test]
    fn test_non_finite_scores_zero() {
        assert_eq!(score(f64::NAN, &rating()), 0.0);
        assert_eq!(score(f64::INFINITY, &rating()), 0.0);
        assert_eq!(score(f64::NEG_INFINITY, &prep_time()), 0.0);
    }

    #[test]
    fn test_zero_width_band_awards_upper_score() {
        let t = ThresholdSet::higher(1.0, 2.0, 2.0, 3.0, 4.0);
        assert!(approx(score(2.0, &t), 60.0));
        assert!(approx(score(1.5, &t), 15.0));
    }
}
