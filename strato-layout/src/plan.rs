/*!
Declarative description of a multi-panel candle chart.

A `PanelPlan` says how many rows the chart has, how tall each one is relative
to the others, and which series each row draws. It carries no drawing code;
any rendering backend can consume it, for example as JSON.
*/

use serde::Serialize;

pub const DEFAULT_MAIN_HEIGHT: f64 = 0.5;
pub const DEFAULT_SPACER_HEIGHT: f64 = 0.12;
pub const DEFAULT_CONTENT_HEIGHT: f64 = 0.25;
pub const DEFAULT_VERTICAL_SPACING: f64 = 0.05;
pub const DEFAULT_FIGURE_HEIGHT: u32 = 1050;
pub const DEFAULT_TICK_FORMAT: &str = "%b %d, %Y";

/// Which optional parts of the chart are switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PanelFlags {
    pub show_volume: bool,
    pub show_stochastic: bool,
    /// Overlays the VWAP moving average on the price row.
    pub show_vwap_ma: bool,
}

impl Default for PanelFlags {
    fn default() -> Self {
        PanelFlags {
            show_volume: true,
            show_stochastic: true,
            show_vwap_ma: true,
        }
    }
}

impl PanelFlags {
    pub fn new(show_volume: bool, show_stochastic: bool, show_vwap_ma: bool) -> Self {
        PanelFlags {
            show_volume,
            show_stochastic,
            show_vwap_ma,
        }
    }

    /// All eight flag combinations.
    pub fn all() -> impl Iterator<Item = PanelFlags> {
        (0u8..8).map(|bits| PanelFlags::new(bits & 1 != 0, bits & 2 != 0, bits & 4 != 0))
    }
}

/// Relative row heights and figure-wide settings.
///
/// Heights are relative weights and need not sum to 1; the renderer
/// normalises them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutParams {
    /// Height of the candlestick row.
    pub main_height: f64,
    /// Height of the blank row that keeps the range slider clear of the next
    /// panel.
    pub spacer_height: f64,
    /// Height of each indicator row (volume, stochastic).
    pub content_height: f64,
    /// Gap between rows, as a fraction of the figure.
    pub vertical_spacing: f64,
    /// Figure height in pixels.
    pub figure_height: u32,
    /// strftime pattern for every time axis.
    pub tick_format: String,
    /// Chart title, e.g. the trading pair.
    pub title: Option<String>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        LayoutParams {
            main_height: DEFAULT_MAIN_HEIGHT,
            spacer_height: DEFAULT_SPACER_HEIGHT,
            content_height: DEFAULT_CONTENT_HEIGHT,
            vertical_spacing: DEFAULT_VERTICAL_SPACING,
            figure_height: DEFAULT_FIGURE_HEIGHT,
            tick_format: DEFAULT_TICK_FORMAT.to_string(),
            title: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Main,
    Spacer,
    Volume,
    Stochastic,
}

impl RowKind {
    pub fn title(self) -> &'static str {
        match self {
            RowKind::Main => "Price",
            RowKind::Spacer => "",
            RowKind::Volume => "Volume",
            RowKind::Stochastic => "Stochastic",
        }
    }

    /// Volume and stochastic rows; they get value-axis grid lines.
    pub fn is_content(self) -> bool {
        matches!(self, RowKind::Volume | RowKind::Stochastic)
    }
}

/// A series a renderer draws from the enriched candle series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    /// OHLC candle bodies.
    Candlestick,
    /// Moving average of VWAP, drawn over the candles.
    VwapMa,
    /// Empty trace that only reserves the spacer row.
    Placeholder,
    Volume,
    StochK,
    StochD,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelRow {
    pub kind: RowKind,
    /// Relative height.
    pub height: f64,
    pub title: String,
    /// Value-axis title; `None` for the spacer.
    pub axis_title: Option<String>,
    pub series: Vec<SeriesKind>,
    /// Whether this row's time axis shows the interactive range slider.
    pub range_slider: bool,
    /// Whether this row's value axis shows grid lines.
    pub show_grid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelPlan {
    pub rows: Vec<PanelRow>,
    pub main_row_index: usize,
    pub spacer_row_index: usize,
    pub volume_row_index: Option<usize>,
    pub stochastic_row_index: Option<usize>,
    pub title: Option<String>,
    /// All rows share one time axis.
    pub shared_time_axis: bool,
    pub show_legend: bool,
    pub vertical_spacing: f64,
    pub figure_height: u32,
    pub tick_format: String,
}

impl PanelPlan {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_heights(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.height).collect()
    }

    /// Index of the row drawing `series`, if any.
    pub fn row_of(&self, series: SeriesKind) -> Option<usize> {
        self.rows.iter().position(|row| row.series.contains(&series))
    }

    /// Indices of rows whose time axis carries the range slider.
    pub fn range_slider_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.range_slider)
            .map(|(i, _)| i)
            .collect()
    }
}
