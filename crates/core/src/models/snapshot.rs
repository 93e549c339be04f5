use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::indicators;

/// RSI value reported when the series is too short to compute one.
pub const NEUTRAL_RSI: f64 = 50.0;

/// RSI look-back used when deriving snapshots from a close series.
pub const SNAPSHOT_RSI_PERIOD: usize = 14;

/// MACD parameters used when deriving snapshots from a close series.
pub const SNAPSHOT_MACD_FAST: usize = 12;
pub const SNAPSHOT_MACD_SLOW: usize = 26;
pub const SNAPSHOT_MACD_SIGNAL: usize = 9;

/// Latest MACD state: the line, its signal, and their difference.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MacdReading {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Point-in-time view of a symbol's technical indicators, the input the
/// technical rules are evaluated against. Hosts can construct one
/// directly or derive it from a close series with [`compute`].
///
/// [`compute`]: TechnicalSnapshot::compute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    pub symbol: String,
    pub rsi: f64,
    pub macd: MacdReading,
    pub volume: u64,
    pub average_volume: u64,
    /// Detected support level, if any. `Some(0.0)` means "not detected".
    pub support_level: Option<f64>,
    /// Detected resistance level, if any. `Some(0.0)` means "not detected".
    pub resistance_level: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl TechnicalSnapshot {
    pub fn new(symbol: impl Into<String>, rsi: f64, macd: MacdReading) -> Self {
        Self {
            symbol: symbol.into().to_uppercase(),
            rsi,
            macd,
            volume: 0,
            average_volume: 0,
            support_level: None,
            resistance_level: None,
            timestamp: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_volume(mut self, volume: u64, average_volume: u64) -> Self {
        self.volume = volume;
        self.average_volume = average_volume;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, support: Option<f64>, resistance: Option<f64>) -> Self {
        self.support_level = support;
        self.resistance_level = resistance;
        self
    }

    /// Derive a snapshot from a close series: latest defined RSI (or the
    /// neutral 50 when the series is too short) and the latest MACD
    /// reading (zeros for an empty series).
    pub fn compute(symbol: impl Into<String>, closes: &[f64]) -> Self {
        let rsi = indicators::rsi(closes, SNAPSHOT_RSI_PERIOD)
            .iter()
            .rev()
            .find_map(|v| *v)
            .unwrap_or(NEUTRAL_RSI);

        let series = indicators::macd(
            closes,
            SNAPSHOT_MACD_FAST,
            SNAPSHOT_MACD_SLOW,
            SNAPSHOT_MACD_SIGNAL,
        );
        let macd = match (
            series.macd.last(),
            series.signal.last(),
            series.histogram.last(),
        ) {
            (Some(&macd), Some(&signal), Some(&histogram)) => MacdReading {
                macd,
                signal,
                histogram,
            },
            _ => MacdReading::default(),
        };

        Self::new(symbol, rsi, macd)
    }

    /// Volume relative to the trailing average. `None` when no average
    /// is known, so breakout rules cannot divide by zero.
    #[must_use]
    pub fn volume_ratio(&self) -> Option<f64> {
        if self.average_volume == 0 {
            None
        } else {
            Some(self.volume as f64 / self.average_volume as f64)
        }
    }
}
