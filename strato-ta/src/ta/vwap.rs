use crate::ta::sma::ramped_sma;
use crate::vars::candle::Candle;

/// Ramped simple moving average of each candle's VWAP.
pub fn vwap_ma(candles: &[Candle], period: usize) -> Vec<Option<f64>> {
    let src: Vec<f64> = candles.iter().map(|c| c.vwap).collect();
    ramped_sma(&src, period)
}
