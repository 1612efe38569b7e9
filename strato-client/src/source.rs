/*!
Candle sources for the client: a saved provider OHLC response or a
synthetic random walk, both cut to the requested date range.
*/

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use chrono::DateTime;
use chrono::Months;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::Utc;
use serde::Deserialize;
use strato_ta::vars::candle::coerce_all;
use strato_ta::vars::candle::RawCandle;
use strato_ta::Candle;
use tracing::info;
use tracing::warn;

/// Key the provider uses for its pagination cursor inside `result`.
const CURSOR_KEY: &str = "last";

/// Provider OHLC response:
/// `{"error": [], "result": {"<PAIR>": [[...], ...], "last": 1688169600}}`.
#[derive(Debug, Deserialize)]
pub struct OhlcResponse {
    #[serde(default)]
    pub error: Vec<String>,
    #[serde(default)]
    pub result: BTreeMap<String, serde_json::Value>,
}

impl OhlcResponse {
    /// Returns the pair name and its rows. Without an explicit `pair`, the
    /// response must hold exactly one pair.
    pub fn into_rows(mut self, pair: Option<&str>) -> Result<(String, Vec<RawCandle>)> {
        if !self.error.is_empty() {
            bail!("provider returned errors: {}", self.error.join(", "));
        }

        let pair = match pair {
            Some(pair) => pair.to_string(),
            None => {
                let pairs: Vec<&String> = self
                    .result
                    .keys()
                    .filter(|key| key.as_str() != CURSOR_KEY)
                    .collect();
                match pairs.as_slice() {
                    [] => bail!("response contains no pair data"),
                    [pair] => pair.to_string(),
                    _ => bail!(
                        "response contains several pairs ({}); choose one with --pair",
                        pairs.iter().map(|p| p.as_str()).collect::<Vec<_>>().join(", ")
                    ),
                }
            }
        };

        let rows = self
            .result
            .remove(&pair)
            .with_context(|| format!("pair {pair} not found in response"))?;
        let rows: Vec<RawCandle> = serde_json::from_value(rows)
            .with_context(|| format!("malformed OHLC rows for {pair}"))?;

        Ok((pair, rows))
    }
}

/// Inclusive date range. Both ends are taken at midnight UTC, so a candle
/// later on the `to` day falls outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Builds a range from optional bounds, defaulting to the year up to
    /// `today`. A missing `to` collapses the range onto `from`.
    pub fn resolve(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Self> {
        let year_before = |day: NaiveDate| day.checked_sub_months(Months::new(12)).unwrap_or(day);
        let (from, to) = match (from, to) {
            (Some(from), Some(to)) => (from, to),
            (Some(from), None) => (from, from),
            (None, Some(to)) => (year_before(to), to),
            (None, None) => (year_before(today), today),
        };
        if from > to {
            bail!("start date {from} is after end date {to}");
        }
        Ok(DateRange { from, to })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.from.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.to.and_time(NaiveTime::MIN).and_utc()
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        timestamp >= self.start() && timestamp <= self.end()
    }

    /// Keeps the candles inside the range, preserving order.
    pub fn filter(&self, candles: Vec<Candle>) -> Vec<Candle> {
        let total = candles.len();
        let kept: Vec<Candle> = candles
            .into_iter()
            .filter(|c| self.contains(c.timestamp))
            .collect();
        if kept.is_empty() && total > 0 {
            warn!(from = %self.from, to = %self.to, total, "no candles inside the date range");
        }
        kept
    }
}

/// Reads a saved provider response and returns the pair name with its
/// candles in ascending time order.
pub fn load_response(path: &Path, pair: Option<&str>) -> Result<(String, Vec<Candle>)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let response: OhlcResponse = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let (pair, rows) = response.into_rows(pair)?;

    let mut candles = coerce_all(&rows)?;
    candles.sort_by_key(|c| c.timestamp);
    info!(%pair, rows = candles.len(), path = %path.display(), "loaded candles");

    Ok((pair, candles))
}
