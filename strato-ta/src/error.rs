//! Errors raised by the indicator engine.

use thiserror::Error;

/// Errors that abort an indicator computation.
///
/// Non-numeric candle fields are not errors: they become unknown values and
/// only affect the rows whose windows contain them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IndicatorError {
    /// A window length of zero was requested.
    #[error("invalid window size for {name}: {value} (must be at least 1)")]
    InvalidWindowSize {
        /// Parameter name, e.g. `k_period`.
        name: &'static str,
        /// Rejected value.
        value: usize,
    },

    /// A provider row carried an epoch timestamp chrono cannot represent.
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

impl IndicatorError {
    /// Returns `Ok(value)` for a usable window length and an
    /// `InvalidWindowSize` error otherwise.
    pub fn check_window(name: &'static str, value: usize) -> Result<usize, IndicatorError> {
        if value == 0 {
            return Err(IndicatorError::InvalidWindowSize { name, value });
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_window() {
        assert_eq!(IndicatorError::check_window("k_period", 14), Ok(14));
        assert_eq!(
            IndicatorError::check_window("d_period", 0),
            Err(IndicatorError::InvalidWindowSize {
                name: "d_period",
                value: 0
            })
        );
    }

    #[test]
    fn test_error_message() {
        let err = IndicatorError::InvalidWindowSize {
            name: "vwap_period",
            value: 0,
        };
        assert_eq!(
            err.to_string(),
            "invalid window size for vwap_period: 0 (must be at least 1)"
        );
    }
}
