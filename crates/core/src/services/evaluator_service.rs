use crate::models::news::NewsItem;
use crate::models::rule::{NewsAlert, PriceAlert, PriceAlertKind, TechnicalAlert, TechnicalAlertKind};
use crate::models::snapshot::TechnicalSnapshot;
use crate::models::tick::PriceTick;

/// RSI boundary used when an overbought rule has no explicit level.
pub const DEFAULT_RSI_OVERBOUGHT: f64 = 70.0;
/// RSI boundary used when an oversold rule has no explicit level.
pub const DEFAULT_RSI_OVERSOLD: f64 = 30.0;
/// Volume multiple used when a breakout rule has no explicit multiplier.
pub const DEFAULT_VOLUME_MULTIPLIER: f64 = 2.0;

/// Decides whether a rule's condition holds for one input.
///
/// Pure predicates with no state and no side effects; the caller owns
/// the trigger transition and notification fan-out. Guards run in a
/// fixed order (active, latch, symbol) before any condition is looked
/// at, so an inactive or already-latched rule can never fire.
pub struct EvaluatorService;

impl EvaluatorService {
    pub fn new() -> Self {
        Self
    }

    pub fn price_alert_matches(&self, alert: &PriceAlert, tick: &PriceTick) -> bool {
        if !alert.active || alert.triggered || alert.symbol != tick.symbol {
            return false;
        }

        match alert.kind {
            PriceAlertKind::Above => tick.price > alert.threshold,
            PriceAlertKind::Below => tick.price < alert.threshold,
            PriceAlertKind::PercentChange => tick.change_percent.abs() > alert.threshold,
            PriceAlertKind::VolumeSpike => tick
                .volume_ratio()
                .is_some_and(|ratio| ratio >= alert.threshold),
        }
    }

    pub fn technical_alert_matches(
        &self,
        alert: &TechnicalAlert,
        snapshot: &TechnicalSnapshot,
    ) -> bool {
        if !alert.active || alert.triggered || alert.symbol != snapshot.symbol {
            return false;
        }

        match alert.kind {
            TechnicalAlertKind::RsiOverbought => {
                snapshot.rsi > alert.params.rsi_level.unwrap_or(DEFAULT_RSI_OVERBOUGHT)
            }
            TechnicalAlertKind::RsiOversold => {
                snapshot.rsi < alert.params.rsi_level.unwrap_or(DEFAULT_RSI_OVERSOLD)
            }
            // Bullish state, not an edge: holds whenever the line sits
            // above its signal.
            TechnicalAlertKind::MacdCrossover => snapshot.macd.macd > snapshot.macd.signal,
            TechnicalAlertKind::VolumeBreakout => snapshot.volume_ratio().is_some_and(|ratio| {
                ratio
                    >= alert
                        .params
                        .volume_multiplier
                        .unwrap_or(DEFAULT_VOLUME_MULTIPLIER)
            }),
            // Fires on the mere presence of a nonzero detected level; the
            // level is not compared against price.
            // TODO: decide whether a break should compare price against
            // the level instead of firing on presence.
            TechnicalAlertKind::SupportBreak => nonzero_level(snapshot.support_level),
            TechnicalAlertKind::ResistanceBreak => nonzero_level(snapshot.resistance_level),
        }
    }

    /// News rules have no latch and no symbol guard in the usual sense:
    /// an empty symbol list matches any item, and matching is driven by
    /// the keyword scan over headline and summary.
    pub fn news_alert_matches(&self, alert: &NewsAlert, item: &NewsItem) -> bool {
        if !alert.active {
            return false;
        }
        if !alert.symbols.is_empty() && !item.symbols.iter().any(|s| alert.symbols.contains(s)) {
            return false;
        }
        if !alert.sentiment.matches(item.sentiment) {
            return false;
        }

        let haystack = format!("{} {}", item.headline, item.summary).to_lowercase();
        alert
            .keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && haystack.contains(&keyword.to_lowercase()))
    }
}

impl Default for EvaluatorService {
    fn default() -> Self {
        Self::new()
    }
}

fn nonzero_level(level: Option<f64>) -> bool {
    level.is_some_and(|l| l != 0.0)
}
