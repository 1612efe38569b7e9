use std::path::PathBuf;

use chrono::NaiveDate;
use clap::Parser;
use strato_layout::PanelFlags;
use strato_ta::indicators::DEFAULT_D_PERIOD;
use strato_ta::indicators::DEFAULT_K_PERIOD;
use strato_ta::indicators::DEFAULT_VWAP_PERIOD;
use strato_ta::IndicatorParams;

/// Computes stochastic and VWAP moving-average indicators for a candle series
/// and prints the chart panel plan.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Saved provider OHLC response (JSON). Without it, candles are generated.
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Pair key inside the response; required when it holds several pairs.
    #[arg(long)]
    pub pair: Option<String>,

    /// First day of the range (YYYY-MM-DD); defaults to one year before `--to`.
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day of the range (YYYY-MM-DD); defaults to today.
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Number of synthetic candles when no input file is given.
    #[arg(long, default_value_t = 365)]
    pub candles: usize,

    /// Seed for synthetic candles.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Candle interval in minutes for synthetic candles.
    #[arg(long, default_value_t = 1440, value_parser = clap::value_parser!(u32).range(1..))]
    pub interval: u32,

    #[arg(long, default_value_t = DEFAULT_K_PERIOD)]
    pub k_period: usize,

    #[arg(long, default_value_t = DEFAULT_D_PERIOD)]
    pub d_period: usize,

    #[arg(long, default_value_t = DEFAULT_VWAP_PERIOD)]
    pub vwap_period: usize,

    /// Hide the volume panel.
    #[arg(long)]
    pub no_volume: bool,

    /// Hide the stochastic panel.
    #[arg(long)]
    pub no_stochastic: bool,

    /// Hide the VWAP moving-average overlay.
    #[arg(long)]
    pub no_vwap_ma: bool,

    /// Rows printed from each end of the enriched series.
    #[arg(long, default_value_t = 20)]
    pub rows: usize,
}

impl Cli {
    pub fn indicator_params(&self) -> IndicatorParams {
        IndicatorParams {
            k_period: self.k_period,
            d_period: self.d_period,
            vwap_period: self.vwap_period,
        }
    }

    pub fn panel_flags(&self) -> PanelFlags {
        PanelFlags::new(!self.no_volume, !self.no_stochastic, !self.no_vwap_ma)
    }
}
