use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use strato_ta::Candle;

const MIN_PRICE: f64 = 100.0;
const MAX_PRICE: f64 = 500.0;
/// Max 5% close-to-close move per candle.
const MAX_CHANGE: f64 = 0.05;
/// Max 2% wick beyond the body.
const MAX_WICK: f64 = 0.02;

/// Random-walk candle stream bouncing between `MIN_PRICE` and `MAX_PRICE`.
///
/// The stream ends once the next timestamp would fall outside chrono's
/// representable range.
pub struct CandleGenerator {
    rng: StdRng,
    close: f64,
    rising: bool,
    timestamp: Option<DateTime<Utc>>,
    interval: Duration,
}

impl CandleGenerator {
    pub fn new(seed: u64, start: DateTime<Utc>, interval: Duration) -> Self {
        CandleGenerator {
            rng: StdRng::seed_from_u64(seed),
            close: MIN_PRICE,
            rising: true,
            timestamp: Some(start),
            interval,
        }
    }

    pub fn take_candles(&mut self, n: usize) -> Vec<Candle> {
        self.by_ref().take(n).collect()
    }
}

impl Iterator for CandleGenerator {
    type Item = Candle;

    fn next(&mut self) -> Option<Candle> {
        let timestamp = self.timestamp?;
        let open = self.close;
        let step = self.rng.gen_range(0.0..MAX_CHANGE);
        let moved = if self.rising {
            open * (1.0 + step)
        } else {
            open * (1.0 - step)
        };
        let close = moved.clamp(MIN_PRICE, MAX_PRICE);

        let high_wick = 1.0 + self.rng.gen_range(0.0..MAX_WICK);
        let low_wick = 1.0 - self.rng.gen_range(0.0..MAX_WICK);
        let high = (open.max(close) * high_wick).clamp(MIN_PRICE, MAX_PRICE);
        let low = (open.min(close) * low_wick).clamp(MIN_PRICE, MAX_PRICE);
        let vwap = (open + high + low + close) / 4.0;
        let volume = self.rng.gen_range(1.0..100.0);

        // Change direction if the price hits the upper or lower bound
        if close >= MAX_PRICE {
            self.rising = false;
        } else if close <= MIN_PRICE {
            self.rising = true;
        }

        let candle = Candle {
            timestamp,
            open,
            high,
            low,
            close,
            vwap,
            volume,
            count: self.rng.gen_range(1..500),
        };

        self.close = close;
        self.timestamp = timestamp.checked_add_signed(self.interval);
        Some(candle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(seed: u64) -> CandleGenerator {
        let start = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        CandleGenerator::new(seed, start, Duration::days(1))
    }

    #[test]
    fn test_candles_are_well_formed() {
        let candles = generator(7).take_candles(500);

        assert_eq!(candles.len(), 500);
        for c in &candles {
            assert!(c.low <= c.open.min(c.close));
            assert!(c.high >= c.open.max(c.close));
            assert!(c.low >= MIN_PRICE && c.high <= MAX_PRICE);
            assert!(c.volume > 0.0);
        }
    }

    #[test]
    fn test_timestamps_step_by_interval() {
        let candles = generator(1).take_candles(3);

        assert_eq!(candles[1].timestamp - candles[0].timestamp, Duration::days(1));
        assert_eq!(candles[2].timestamp - candles[1].timestamp, Duration::days(1));
    }

    #[test]
    fn test_stops_at_end_of_time() {
        let start = DateTime::<Utc>::MAX_UTC - Duration::days(2);
        let candles = CandleGenerator::new(5, start, Duration::days(1)).take_candles(10);

        assert_eq!(candles.len(), 3);
        assert_eq!(candles[2].timestamp, DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn test_same_seed_same_series() {
        assert_eq!(generator(42).take_candles(20), generator(42).take_candles(20));
    }
}
