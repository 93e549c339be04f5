use log::debug;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::news::NewsItem;
use crate::models::rule::{AlertKind, NewsAlert, PriceAlert, TechnicalAlert};
use crate::models::snapshot::TechnicalSnapshot;
use crate::models::state::AlertState;
use crate::models::tick::PriceTick;
use crate::services::evaluator_service::EvaluatorService;
use crate::services::notification_service::NotificationService;

/// Rule lifecycle and evaluation over the state aggregate.
///
/// Pure business logic with no I/O: the caller passes the state in and
/// decides when to persist. Evaluation walks every rule of the relevant
/// family; all matches in a pass fire, there is no early exit.
pub struct AlertService {
    evaluator: EvaluatorService,
}

impl AlertService {
    pub fn new() -> Self {
        Self {
            evaluator: EvaluatorService::new(),
        }
    }

    // ── Rule lifecycle ────────────────────────────────────────────────────

    pub fn add_price_alert(
        &self,
        state: &mut AlertState,
        alert: PriceAlert,
    ) -> Result<Uuid, CoreError> {
        self.validate_price_alert(&alert)?;
        let id = alert.id;
        state.price_alerts.push(alert);
        Ok(id)
    }

    pub fn add_technical_alert(
        &self,
        state: &mut AlertState,
        alert: TechnicalAlert,
    ) -> Result<Uuid, CoreError> {
        self.validate_technical_alert(&alert)?;
        let id = alert.id;
        state.technical_alerts.push(alert);
        Ok(id)
    }

    pub fn add_news_alert(
        &self,
        state: &mut AlertState,
        alert: NewsAlert,
    ) -> Result<Uuid, CoreError> {
        self.validate_news_alert(&alert)?;
        let id = alert.id;
        state.news_alerts.push(alert);
        Ok(id)
    }

    /// Flip a rule's active flag. Returns false when the id is unknown
    /// in the given family.
    pub fn toggle_alert(&self, state: &mut AlertState, id: Uuid, kind: AlertKind) -> bool {
        match kind {
            AlertKind::Price => state
                .price_alerts
                .iter_mut()
                .find(|a| a.id == id)
                .map(|a| a.active = !a.active)
                .is_some(),
            AlertKind::Technical => state
                .technical_alerts
                .iter_mut()
                .find(|a| a.id == id)
                .map(|a| a.active = !a.active)
                .is_some(),
            AlertKind::News => state
                .news_alerts
                .iter_mut()
                .find(|a| a.id == id)
                .map(|a| a.active = !a.active)
                .is_some(),
        }
    }

    /// Returns false when the id is unknown in the given family.
    pub fn remove_alert(&self, state: &mut AlertState, id: Uuid, kind: AlertKind) -> bool {
        match kind {
            AlertKind::Price => {
                let before = state.price_alerts.len();
                state.price_alerts.retain(|a| a.id != id);
                state.price_alerts.len() != before
            }
            AlertKind::Technical => {
                let before = state.technical_alerts.len();
                state.technical_alerts.retain(|a| a.id != id);
                state.technical_alerts.len() != before
            }
            AlertKind::News => {
                let before = state.news_alerts.len();
                state.news_alerts.retain(|a| a.id != id);
                state.news_alerts.len() != before
            }
        }
    }

    /// Remove every latched price and technical rule. Returns how many
    /// were dropped.
    pub fn clear_triggered(&self, state: &mut AlertState) -> usize {
        let before = state.price_alerts.len() + state.technical_alerts.len();
        state.price_alerts.retain(|a| !a.triggered);
        state.technical_alerts.retain(|a| !a.triggered);
        before - state.price_alerts.len() - state.technical_alerts.len()
    }

    // ── Evaluation ────────────────────────────────────────────────────────

    /// Evaluate one tick against every price rule. Each match latches
    /// its rule, dispatches through the notifier, and lands in the
    /// notification center. Returns the number of rules fired.
    pub fn evaluate_tick(
        &self,
        state: &mut AlertState,
        tick: &PriceTick,
        notifier: &mut NotificationService,
    ) -> usize {
        let mut fired = 0;
        for idx in 0..state.price_alerts.len() {
            if !self
                .evaluator
                .price_alert_matches(&state.price_alerts[idx], tick)
            {
                continue;
            }

            state.price_alerts[idx].mark_triggered(tick);
            let notification = notifier.dispatch_price(&state.price_alerts[idx], tick);
            debug!(
                "price alert {} fired for {} at {:.2}",
                state.price_alerts[idx].id, tick.symbol, tick.price
            );
            state.push_notification(notification);
            fired += 1;
        }
        fired
    }

    /// Evaluate one technical snapshot against every technical rule.
    pub fn evaluate_snapshot(
        &self,
        state: &mut AlertState,
        snapshot: &TechnicalSnapshot,
        notifier: &mut NotificationService,
    ) -> usize {
        let mut fired = 0;
        for idx in 0..state.technical_alerts.len() {
            if !self
                .evaluator
                .technical_alert_matches(&state.technical_alerts[idx], snapshot)
            {
                continue;
            }

            state.technical_alerts[idx].mark_triggered();
            let notification = notifier.dispatch_technical(&state.technical_alerts[idx], snapshot);
            debug!(
                "technical alert {} fired for {}",
                state.technical_alerts[idx].id, snapshot.symbol
            );
            state.push_notification(notification);
            fired += 1;
        }
        fired
    }

    /// Evaluate one news item against every news rule. News rules never
    /// latch, so the same rule fires again on the next matching item.
    pub fn evaluate_news(
        &self,
        state: &mut AlertState,
        item: &NewsItem,
        notifier: &mut NotificationService,
    ) -> usize {
        let mut fired = 0;
        for idx in 0..state.news_alerts.len() {
            if !self.evaluator.news_alert_matches(&state.news_alerts[idx], item) {
                continue;
            }

            let notification = notifier.dispatch_news(&state.news_alerts[idx], item);
            debug!(
                "news alert {} matched headline {:?}",
                state.news_alerts[idx].id, item.headline
            );
            state.push_notification(notification);
            fired += 1;
        }
        fired
    }

    // ── Validation ────────────────────────────────────────────────────────

    /// Validate a price rule before it enters the store.
    ///
    /// Rules:
    /// - Symbol must not be blank
    /// - Threshold must be finite
    fn validate_price_alert(&self, alert: &PriceAlert) -> Result<(), CoreError> {
        if alert.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Alert symbol must not be blank".into(),
            ));
        }
        if !alert.threshold.is_finite() {
            return Err(CoreError::ValidationError(format!(
                "Alert threshold must be finite, got {}",
                alert.threshold
            )));
        }
        Ok(())
    }

    /// Validate a technical rule before it enters the store.
    ///
    /// Rules:
    /// - Symbol must not be blank
    /// - Parameters that are set must be finite
    fn validate_technical_alert(&self, alert: &TechnicalAlert) -> Result<(), CoreError> {
        if alert.symbol.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Alert symbol must not be blank".into(),
            ));
        }
        let params = [
            ("rsi_level", alert.params.rsi_level),
            ("level", alert.params.level),
            ("volume_multiplier", alert.params.volume_multiplier),
        ];
        for (name, value) in params {
            if let Some(v) = value {
                if !v.is_finite() {
                    return Err(CoreError::ValidationError(format!(
                        "Technical parameter {name} must be finite, got {v}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Validate a news rule before it enters the store.
    ///
    /// Rules:
    /// - Listed symbols must not be blank (an empty list still means
    ///   any symbol)
    fn validate_news_alert(&self, alert: &NewsAlert) -> Result<(), CoreError> {
        if alert.symbols.iter().any(|s| s.trim().is_empty()) {
            return Err(CoreError::ValidationError(
                "News symbols must not be blank".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
