//! Nonlinear shaping of raw correlation values
//!
//! Raising positive correlations to the fourth power sharply suppresses
//! weak, noisy correlations while preserving strong ones; non-positive
//! correlations are clamped to zero. The result is a peaked periodicity
//! indicator rather than a noisy correlation surface.

/// Exponent applied to positive correlation values.
///
/// Higher values suppress weak correlations more aggressively.
pub const SHAPING_EXPONENT: i32 = 4;

/// Shape a raw correlation coefficient into a periodicity indicator.
///
/// `r^SHAPING_EXPONENT` for positive `r`, zero otherwise.
#[inline]
pub fn shape(r: f64) -> f64 {
    if r > 0.0 {
        r.powi(SHAPING_EXPONENT)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_clamps_non_positive() {
        assert_eq!(shape(0.0), 0.0);
        assert_eq!(shape(-0.5), 0.0);
        assert_eq!(shape(-1.0), 0.0);
    }

    #[test]
    fn test_shape_fourth_power() {
        assert!((shape(1.0) - 1.0).abs() < 1e-15);
        assert!((shape(0.5) - 0.0625).abs() < 1e-15);
        assert!((shape(0.9) - 0.9f64.powi(4)).abs() < 1e-15);
    }

    #[test]
    fn test_shape_monotonic_on_positive_range() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let r = i as f64 / 100.0;
            let s = shape(r);
            assert!(s >= prev, "shape not monotonic at r = {}", r);
            prev = s;
        }
    }

    #[test]
    fn test_shape_suppresses_weak_correlations() {
        // A weak correlation shrinks much more than a strong one
        assert!(shape(0.2) < 0.01);
        assert!(shape(0.95) > 0.8);
    }
}
