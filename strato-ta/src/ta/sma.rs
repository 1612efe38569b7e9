use statrs::statistics::Statistics;

use crate::ta::window::known;
use crate::ta::window::ramp_start;

/// Simple moving average over a ramped causal window.
///
/// Unlike a warm-up SMA, the first `period - 1` outputs are averages of the
/// samples seen so far. Unknown samples (NaN) are left out of both the sum
/// and the count; a window with no known sample yields `None`.
pub fn ramped_sma(src: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut sma_values = Vec::with_capacity(src.len());

    for i in 0..src.len() {
        let window = &src[ramp_start(i, period)..=i];
        sma_values.push(mean_of_known(window.iter().copied().filter_map(known)));
    }

    sma_values
}

/// Same as [`ramped_sma`] for a series that is already optional, e.g. a
/// derived indicator line.
pub fn ramped_sma_opt(src: &[Option<f64>], period: usize) -> Vec<Option<f64>> {
    let mut sma_values = Vec::with_capacity(src.len());

    for i in 0..src.len() {
        let window = &src[ramp_start(i, period)..=i];
        sma_values.push(mean_of_known(window.iter().flatten().copied()));
    }

    sma_values
}

fn mean_of_known(values: impl Iterator<Item = f64>) -> Option<f64> {
    let values: Vec<f64> = values.collect();
    if values.is_empty() {
        return None;
    }
    Some(values.mean())
}
