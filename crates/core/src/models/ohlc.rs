use serde::{Deserialize, Serialize};

/// One OHLC bar of a price series. Input shape for the window-based
/// indicators (stochastic oscillator, average true range).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlc {
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Ohlc {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            open,
            high,
            low,
            close,
        }
    }

    /// Bar with all four fields at the same price (flat window helper).
    pub fn flat(price: f64) -> Self {
        Self::new(price, price, price, price)
    }
}
