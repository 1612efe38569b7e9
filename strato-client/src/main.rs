mod cli;
mod source;
mod synthetic;

use anyhow::Context;
use anyhow::Result;
use chrono::Duration;
use chrono::Utc;
use clap::Parser;
use strato_layout::plan_panels_with;
use strato_layout::LayoutParams;
use strato_ta::compute_indicators;
use strato_ta::EnrichedCandle;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::source::DateRange;
use crate::synthetic::CandleGenerator;

const SYNTHETIC_PAIR: &str = "SYNTH/USD";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(&cli)
}

fn run(cli: &Cli) -> Result<()> {
    let range = DateRange::resolve(cli.from, cli.to, Utc::now().date_naive())?;

    let (pair, candles) = match &cli.input {
        Some(path) => source::load_response(path, cli.pair.as_deref())?,
        None => {
            let interval = Duration::minutes(i64::from(cli.interval));
            let mut generator = CandleGenerator::new(cli.seed, range.start(), interval);
            let pair = cli.pair.clone().unwrap_or_else(|| SYNTHETIC_PAIR.to_string());
            (pair, generator.take_candles(cli.candles))
        }
    };
    let candles = range.filter(candles);

    let enriched = compute_indicators(&candles, &cli.indicator_params())
        .context("failed to compute indicators")?;

    let layout = LayoutParams {
        title: Some(format!("Pair {pair}")),
        ..Default::default()
    };
    let plan = plan_panels_with(cli.panel_flags(), &layout);
    info!(%pair, candles = enriched.len(), rows = plan.row_count(), "chart plan ready");

    println!("{}", serde_json::to_string_pretty(&plan)?);
    println!();
    print_rows(&enriched, cli.rows);

    Ok(())
}

/// Splits the series into the first and last `rows` candles without
/// repeating any candle when the series is short.
fn head_and_tail(
    enriched: &[EnrichedCandle],
    rows: usize,
) -> (&[EnrichedCandle], &[EnrichedCandle]) {
    let head = &enriched[..rows.min(enriched.len())];
    let tail_start = enriched.len().saturating_sub(rows).max(head.len());
    (head, &enriched[tail_start..])
}

fn print_rows(enriched: &[EnrichedCandle], rows: usize) {
    println!(
        "{:<20} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>8} {:>8} {:>12}",
        "timestamp", "open", "high", "low", "close", "vwap", "volume", "%K", "%D", "vwap_ma"
    );

    let (head, tail) = head_and_tail(enriched, rows);
    for e in head {
        println!("{}", format_row(e));
    }
    if !tail.is_empty() {
        println!("...");
        for e in tail {
            println!("{}", format_row(e));
        }
    }
}

fn format_row(e: &EnrichedCandle) -> String {
    let opt = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v:.2}"));
    let c = &e.candle;
    format!(
        "{:<20} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.2} {:>12.4} {:>8} {:>8} {:>12}",
        c.timestamp.format("%Y-%m-%d %H:%M"),
        c.open,
        c.high,
        c.low,
        c.close,
        c.vwap,
        c.volume,
        opt(e.stoch_k),
        opt(e.stoch_d),
        opt(e.vwap_ma)
    )
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use strato_layout::PanelFlags;
    use strato_ta::IndicatorParams;

    use super::*;

    fn enriched(n: usize) -> Vec<EnrichedCandle> {
        let start = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
        let candles = CandleGenerator::new(3, start, Duration::hours(1)).take_candles(n);
        compute_indicators(&candles, &IndicatorParams::default()).unwrap()
    }

    #[test]
    fn test_head_and_tail_long_series() {
        let series = enriched(50);
        let (head, tail) = head_and_tail(&series, 20);

        assert_eq!(head.len(), 20);
        assert_eq!(tail.len(), 20);
        assert_eq!(tail[0], series[30]);
    }

    #[test]
    fn test_head_and_tail_short_series() {
        let series = enriched(25);
        let (head, tail) = head_and_tail(&series, 20);

        assert_eq!(head.len(), 20);
        assert_eq!(tail.len(), 5);

        let (head, tail) = head_and_tail(&series[..10], 20);
        assert_eq!(head.len(), 10);
        assert!(tail.is_empty());
    }

    #[test]
    fn test_format_row_marks_unknown() {
        let mut row = enriched(1)[0];
        row.stoch_d = None;
        let line = format_row(&row);

        assert!(line.starts_with("2024-01-01 00:00"));
        assert!(line.contains(" -"));
    }

    #[test]
    fn test_synthetic_pipeline() {
        let series = enriched(200);
        let plan = plan_panels_with(PanelFlags::default(), &LayoutParams::default());

        assert_eq!(series.len(), 200);
        assert!(series.iter().all(|e| e.stoch_k.is_some() && e.vwap_ma.is_some()));
        assert_eq!(plan.row_count(), 4);
    }
}
