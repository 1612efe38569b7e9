pub mod error;
pub mod indicators;
pub mod ta;
pub mod vars;

pub use error::IndicatorError;
pub use indicators::compute_indicators;
pub use indicators::IndicatorParams;
pub use vars::candle::Candle;
pub use vars::candle::EnrichedCandle;
pub use vars::candle::RawCandle;
