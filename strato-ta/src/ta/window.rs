//! Causal window helpers shared by the rolling indicators.

/// First index of the causal window ending at `i`.
///
/// The window ramps up from a single sample at the start of the series until
/// `period` samples are available, so no padding or look-ahead is needed.
/// `period` must be at least 1.
pub fn ramp_start(i: usize, period: usize) -> usize {
    (i + 1).saturating_sub(period)
}

/// Returns the value if it is a finite number, `None` if it is unknown.
pub fn known(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_start() {
        assert_eq!(ramp_start(0, 3), 0);
        assert_eq!(ramp_start(1, 3), 0);
        assert_eq!(ramp_start(2, 3), 0);
        assert_eq!(ramp_start(3, 3), 1);
        assert_eq!(ramp_start(10, 3), 8);
        assert_eq!(ramp_start(5, 1), 5);
    }

    #[test]
    fn test_known() {
        assert_eq!(known(1.5), Some(1.5));
        assert_eq!(known(f64::NAN), None);
        assert_eq!(known(f64::INFINITY), None);
    }
}
