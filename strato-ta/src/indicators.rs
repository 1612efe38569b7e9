/*!
Enriches a candle series with the stochastic oscillator (%K/%D) and a
moving average of VWAP.

Every rolling window is causal and ramps up from a single candle at the start
of the series, so the output always has one row per input candle.
*/

use tracing::debug;

use crate::error::IndicatorError;
use crate::ta::stoch::stochastic;
use crate::ta::vwap::vwap_ma;
use crate::vars::candle::Candle;
use crate::vars::candle::EnrichedCandle;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;
pub const DEFAULT_VWAP_PERIOD: usize = 14;

/// Window lengths for the indicator engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorParams {
    /// Lookback of the %K high/low range.
    pub k_period: usize,
    /// Smoothing length of %D over %K.
    pub d_period: usize,
    /// Length of the VWAP moving average.
    pub vwap_period: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            k_period: DEFAULT_K_PERIOD,
            d_period: DEFAULT_D_PERIOD,
            vwap_period: DEFAULT_VWAP_PERIOD,
        }
    }
}

impl IndicatorParams {
    /// Rejects any zero-length window.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        IndicatorError::check_window("k_period", self.k_period)?;
        IndicatorError::check_window("d_period", self.d_period)?;
        IndicatorError::check_window("vwap_period", self.vwap_period)?;
        Ok(())
    }
}

/// Computes %K, %D and the VWAP moving average for every candle.
///
/// # Arguments
///
/// * `candles` - Candles sorted ascending by timestamp.
/// * `params` - Window lengths; all must be at least 1.
///
/// # Returns
///
/// One `EnrichedCandle` per input candle, in input order. Unknown inputs
/// make only the affected positions unknown.
///
/// # Errors
///
/// `IndicatorError::InvalidWindowSize` if any window length is zero. No
/// partial output is produced in that case.
pub fn compute_indicators(
    candles: &[Candle],
    params: &IndicatorParams,
) -> Result<Vec<EnrichedCandle>, IndicatorError> {
    params.validate()?;

    debug!(
        len = candles.len(),
        k_period = params.k_period,
        d_period = params.d_period,
        vwap_period = params.vwap_period,
        "computing indicators"
    );

    let (k_values, d_values) = stochastic(candles, params.k_period, params.d_period);
    let vwap_ma_values = vwap_ma(candles, params.vwap_period);

    let enriched = candles
        .iter()
        .zip(k_values)
        .zip(d_values)
        .zip(vwap_ma_values)
        .map(|(((candle, stoch_k), stoch_d), vwap_ma)| EnrichedCandle {
            candle: *candle,
            stoch_k,
            stoch_d,
            vwap_ma,
        })
        .collect();

    Ok(enriched)
}
