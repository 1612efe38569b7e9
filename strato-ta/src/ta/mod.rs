pub mod sma;
pub mod stoch;
pub mod vwap;
pub mod window;
