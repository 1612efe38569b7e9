use statrs::statistics::Statistics;

use crate::ta::sma::ramped_sma_opt;
use crate::ta::window::known;
use crate::ta::window::ramp_start;
use crate::vars::candle::Candle;

/// Stochastic %K over a ramped causal window of `k_period` candles.
///
/// `%K = (close - lowest low) / (highest high - lowest low) * 100`. A flat
/// window (highest high not above lowest low) gives `0`. The value is unknown
/// when the close is unknown or the window holds no known low or high.
pub fn stoch_k(candles: &[Candle], k_period: usize) -> Vec<Option<f64>> {
    let mut k_values = Vec::with_capacity(candles.len());

    for i in 0..candles.len() {
        let window = &candles[ramp_start(i, k_period)..=i];
        let lows: Vec<f64> = window.iter().filter_map(|c| known(c.low)).collect();
        let highs: Vec<f64> = window.iter().filter_map(|c| known(c.high)).collect();

        let k = match known(candles[i].close) {
            Some(close) if !lows.is_empty() && !highs.is_empty() => {
                let low_min = Statistics::min(lows.iter());
                let high_max = Statistics::max(highs.iter());
                if high_max > low_min {
                    Some((close - low_min) / (high_max - low_min) * 100.0)
                } else {
                    Some(0.0)
                }
            }
            _ => None,
        };
        k_values.push(k);
    }

    k_values
}

/// Stochastic %D: ramped simple moving average of a complete %K line.
pub fn stoch_d(k_values: &[Option<f64>], d_period: usize) -> Vec<Option<f64>> {
    ramped_sma_opt(k_values, d_period)
}

/// Computes %K for the whole series first, then %D from it.
pub fn stochastic(
    candles: &[Candle],
    k_period: usize,
    d_period: usize,
) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let k_values = stoch_k(candles, k_period);
    let d_values = stoch_d(&k_values, d_period);
    (k_values, d_values)
}
