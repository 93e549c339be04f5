use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single market observation for one symbol. Carries everything the
/// price rules evaluate against: last price, day-over-day change, and
/// volume next to its trailing average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub symbol: String,
    pub price: f64,
    pub previous_close: f64,
    pub change: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub average_volume: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub bid: f64,
    pub ask: f64,
    pub timestamp: DateTime<Utc>,
}

impl PriceTick {
    /// Tick with derived change fields. Symbols are normalized to
    /// uppercase so rule matching is case-insensitive at the edges.
    pub fn new(symbol: impl Into<String>, price: f64, previous_close: f64) -> Self {
        let change = price - previous_close;
        let change_percent = if previous_close != 0.0 {
            change / previous_close * 100.0
        } else {
            0.0
        };

        Self {
            symbol: symbol.into().to_uppercase(),
            price,
            previous_close,
            change,
            change_percent,
            volume: 0,
            average_volume: 0,
            open: price,
            high: price,
            low: price,
            bid: price,
            ask: price,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_volume(mut self, volume: u64, average_volume: u64) -> Self {
        self.volume = volume;
        self.average_volume = average_volume;
        self
    }

    /// Day-session range; `new` seeds all three with the last price.
    #[must_use]
    pub fn with_session(mut self, open: f64, high: f64, low: f64) -> Self {
        self.open = open;
        self.high = high;
        self.low = low;
        self
    }

    #[must_use]
    pub fn with_quote(mut self, bid: f64, ask: f64) -> Self {
        self.bid = bid;
        self.ask = ask;
        self
    }

    /// Volume relative to the trailing average. `None` when no average
    /// is known, so spike rules cannot divide by zero.
    #[must_use]
    pub fn volume_ratio(&self) -> Option<f64> {
        if self.average_volume == 0 {
            None
        } else {
            Some(self.volume as f64 / self.average_volume as f64)
        }
    }
}
