//! Pure indicator and risk math over price series.
//!
//! All functions take plain slices and return full-length series so
//! output indices line up with input indices. Window-based indicators
//! use `Option<f64>` and report `None` until their look-back fills;
//! seeded indicators (EMA, MACD, ATR) are defined at every index.
//! Degenerate input (empty series, zero periods) yields empty or
//! all-`None` output, never a panic.

pub mod atr;
pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod risk;
pub mod rsi;
pub mod sma;
pub mod stochastic;

pub use atr::atr;
pub use bollinger::{bollinger, BollingerSeries};
pub use ema::ema;
pub use macd::{macd, MacdSeries};
pub use risk::{
    calmar_ratio, historical_var, max_drawdown, sharpe_ratio, sortino_ratio, DrawdownSeries,
};
pub use rsi::rsi;
pub use sma::sma;
pub use stochastic::{stochastic, StochasticSeries};
