//! Numeric conversion helpers for summary statistics.

use num_traits::cast::cast;

/// Convert a count to f64, saturating on the (theoretical) overflow path.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(f64::MAX)
}

#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(f64::MAX)
}

/// Arithmetic mean of `total` over `count`; zero when nothing was counted.
#[must_use]
pub fn mean(total: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    u64_to_f64(total) / usize_to_f64(count)
}

/// `part / whole` as a percentage in `0.0..=100.0`.
#[must_use]
pub fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    (usize_to_f64(part) / usize_to_f64(whole) * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_nothing_is_zero() {
        assert!(mean(10, 0).abs() < f64::EPSILON);
        assert!((mean(10, 4) - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn percent_is_bounded() {
        assert!((percent(1, 4) - 25.0).abs() < f64::EPSILON);
        assert!(percent(3, 0).abs() < f64::EPSILON);
        assert!((percent(5, 4) - 100.0).abs() < f64::EPSILON);
    }
}
