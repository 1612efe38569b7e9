use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::error::IndicatorError;

/// One OHLCV sample plus the interval's volume-weighted average price.
///
/// A price or volume that could not be read as a number is stored as
/// `f64::NAN` and treated as unknown by every aggregate.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub vwap: f64,
    pub volume: f64,
    /// Number of trades in the interval.
    pub count: u64,
}

/// A `Candle` with the derived indicator values for its position in the
/// series. `None` means unknown.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct EnrichedCandle {
    #[serde(flatten)]
    pub candle: Candle,
    pub stoch_k: Option<f64>,
    pub stoch_d: Option<f64>,
    pub vwap_ma: Option<f64>,
}

/// A numeric field as the market-data provider sends it: usually a decimal
/// string, sometimes a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
    Null,
}

impl RawNumber {
    /// Parses the field, returning `None` for anything that is not a finite
    /// number.
    pub fn to_f64(&self) -> Option<f64> {
        let value = match self {
            RawNumber::Number(v) => *v,
            RawNumber::Text(s) => s.trim().parse::<f64>().ok()?,
            RawNumber::Null => return None,
        };
        value.is_finite().then_some(value)
    }
}

impl From<f64> for RawNumber {
    fn from(value: f64) -> Self {
        RawNumber::Number(value)
    }
}

impl From<&str> for RawNumber {
    fn from(value: &str) -> Self {
        RawNumber::Text(value.to_string())
    }
}

/// One provider OHLC row:
/// `[time, open, high, low, close, vwap, volume, count]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawCandle {
    /// Epoch seconds.
    pub time: i64,
    pub open: RawNumber,
    pub high: RawNumber,
    pub low: RawNumber,
    pub close: RawNumber,
    pub vwap: RawNumber,
    pub volume: RawNumber,
    #[serde(default)]
    pub count: u64,
}

impl RawCandle {
    /// Converts the row into a `Candle`.
    ///
    /// Fields that cannot be coerced to a number become unknown (NaN). Only a
    /// timestamp outside chrono's range fails the row.
    pub fn coerce(&self) -> Result<Candle, IndicatorError> {
        let timestamp = DateTime::from_timestamp(self.time, 0)
            .ok_or(IndicatorError::InvalidTimestamp(self.time))?;

        let field = |name: &'static str, raw: &RawNumber| match raw.to_f64() {
            Some(value) => value,
            None => {
                debug!(
                    time = self.time,
                    field = name,
                    raw = ?raw,
                    "non-numeric value treated as unknown"
                );
                f64::NAN
            }
        };

        Ok(Candle {
            timestamp,
            open: field("open", &self.open),
            high: field("high", &self.high),
            low: field("low", &self.low),
            close: field("close", &self.close),
            vwap: field("vwap", &self.vwap),
            volume: field("volume", &self.volume),
            count: self.count,
        })
    }
}

/// Coerces a batch of provider rows, keeping their order.
pub fn coerce_all(rows: &[RawCandle]) -> Result<Vec<Candle>, IndicatorError> {
    rows.iter().map(RawCandle::coerce).collect()
}
