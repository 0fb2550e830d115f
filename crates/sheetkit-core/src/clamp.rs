#![forbid(unsafe_code)]

//! Rubber-band resistance clamp for drag heights.
//!
//! [`resist`] maps a candidate pixel height to a bounded, resistance-damped
//! height: values inside `[min_px, max_px]` pass through unchanged, values
//! outside keep moving but increasingly slowly. There is no hard stop — the
//! overshoot grows without bound, damped by `resistance_factor`.
//!
//! # Invariants
//!
//! 1. Idempotent on in-bounds values: `resist(resist(h, ..), ..) == resist(h, ..)`.
//! 2. Output never exceeds `max_px + (candidate - max_px) * factor` above, nor
//!    drops below `min_px - (min_px - candidate) * factor` below.
//! 3. Monotone in `candidate_px` for `factor >= 0`.

/// Apply rubber-band damping to a candidate height.
///
/// Callers are expected to pass validated bounds (`min_px <= max_px`) and a
/// non-negative factor; see `SheetConfig` for the validated entry point.
#[must_use]
pub fn resist(candidate_px: f64, min_px: f64, max_px: f64, resistance_factor: f64) -> f64 {
    if candidate_px > max_px {
        max_px + (candidate_px - max_px) * resistance_factor
    } else if candidate_px < min_px {
        min_px - (min_px - candidate_px) * resistance_factor
    } else {
        candidate_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const MIN: f64 = 320.0;
    const MAX: f64 = 704.0;
    const FACTOR: f64 = 0.2;

    #[test]
    fn in_bounds_is_identity() {
        assert_eq!(resist(500.0, MIN, MAX, FACTOR), 500.0);
        assert_eq!(resist(MIN, MIN, MAX, FACTOR), MIN);
        assert_eq!(resist(MAX, MIN, MAX, FACTOR), MAX);
    }

    #[test]
    fn above_max_is_damped() {
        // 100px of raw overshoot becomes 20px at factor 0.2
        assert_eq!(resist(MAX + 100.0, MIN, MAX, FACTOR), MAX + 20.0);
    }

    #[test]
    fn below_min_is_damped() {
        assert_eq!(resist(MIN - 100.0, MIN, MAX, FACTOR), MIN - 20.0);
    }

    #[test]
    fn zero_factor_pins_to_bounds() {
        assert_eq!(resist(10_000.0, MIN, MAX, 0.0), MAX);
        assert_eq!(resist(-10_000.0, MIN, MAX, 0.0), MIN);
    }

    #[test]
    fn overshoot_is_unbounded_but_damped() {
        // No hard ceiling: larger raw overshoot always yields a larger height.
        let near = resist(MAX + 1_000.0, MIN, MAX, FACTOR);
        let far = resist(MAX + 100_000.0, MIN, MAX, FACTOR);
        assert!(far > near);
        assert_eq!(far, MAX + 100_000.0 * FACTOR);
    }

    proptest! {
        #[test]
        fn output_stays_in_damped_envelope(candidate in -5_000.0f64..5_000.0) {
            let out = resist(candidate, MIN, MAX, FACTOR);
            let upper = MAX + (candidate - MAX).max(0.0) * FACTOR;
            let lower = MIN - (MIN - candidate).max(0.0) * FACTOR;
            prop_assert!(out <= upper + 1e-9);
            prop_assert!(out >= lower - 1e-9);
        }

        #[test]
        fn idempotent_on_in_bounds_values(candidate in 320.0f64..=704.0) {
            let once = resist(candidate, MIN, MAX, FACTOR);
            prop_assert_eq!(once, candidate);
            prop_assert_eq!(resist(once, MIN, MAX, FACTOR), once);
        }

        #[test]
        fn monotone_in_candidate(a in -5_000.0f64..5_000.0, b in -5_000.0f64..5_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(resist(lo, MIN, MAX, FACTOR) <= resist(hi, MIN, MAX, FACTOR));
        }
    }
}
