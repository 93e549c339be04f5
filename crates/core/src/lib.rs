pub mod channels;
pub mod errors;
pub mod feed;
pub mod indicators;
pub mod models;
pub mod services;
pub mod storage;

use log::warn;
use uuid::Uuid;

use channels::traits::{DesktopNotifier, SoundPlayer};
use models::{
    news::NewsItem,
    notification::Notification,
    rule::{AlertKind, NewsAlert, PriceAlert, TechnicalAlert},
    settings::{AlertSettings, SettingsUpdate},
    snapshot::TechnicalSnapshot,
    state::AlertState,
    tick::PriceTick,
};
use services::{alert_service::AlertService, notification_service::NotificationService};
use storage::manager::StorageManager;
use storage::store::{MemoryStore, StateStore};

use errors::CoreError;

/// Main entry point for the StockWatch core library.
/// Holds the alert state and all services needed to operate on it.
///
/// Every mutating operation writes the whole aggregate back to the
/// store, so the engine can be dropped at any point without losing
/// rules or notification history.
#[must_use]
pub struct StockWatch {
    state: AlertState,
    alert_service: AlertService,
    notification_service: NotificationService,
    store: Box<dyn StateStore>,
}

impl std::fmt::Debug for StockWatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StockWatch")
            .field("price_alerts", &self.state.price_alerts.len())
            .field("technical_alerts", &self.state.technical_alerts.len())
            .field("news_alerts", &self.state.news_alerts.len())
            .field("notifications", &self.state.notifications.len())
            .field("settings", &self.state.settings)
            .finish()
    }
}

impl StockWatch {
    /// Engine with an empty state and an in-memory store: nothing
    /// survives the instance. Useful for tests and previews.
    pub fn new() -> Self {
        Self::with_store(Box::new(MemoryStore::new()))
    }

    /// Engine backed by the given store. Previously stored state is
    /// loaded; an empty store starts an empty state. An unreadable
    /// snapshot is logged and replaced by the default state rather than
    /// refusing to start.
    pub fn with_store(store: Box<dyn StateStore>) -> Self {
        Self::build(store, NotificationService::new())
    }

    /// Engine backed by the given store with real delivery channels.
    pub fn with_channels(
        store: Box<dyn StateStore>,
        desktop: Box<dyn DesktopNotifier>,
        sound: Box<dyn SoundPlayer>,
    ) -> Self {
        Self::build(store, NotificationService::with_channels(desktop, sound))
    }

    fn build(mut store: Box<dyn StateStore>, mut notification_service: NotificationService) -> Self {
        let state = match store.load() {
            Ok(Some(bytes)) => match StorageManager::load_from_bytes(&bytes) {
                Ok(state) => state,
                Err(e) => {
                    warn!("stored alert state unreadable, starting empty: {e}");
                    AlertState::default()
                }
            },
            Ok(None) => AlertState::default(),
            Err(e) => {
                warn!("failed to read alert state from store, starting empty: {e}");
                AlertState::default()
            }
        };

        notification_service.configure(&state.settings);

        Self {
            state,
            alert_service: AlertService::new(),
            notification_service,
            store,
        }
    }

    // ── Market Data Intake ──────────────────────────────────────────

    /// Evaluate one tick against every price rule. Fired rules latch,
    /// their notifications land in the center, and the state is
    /// persisted when anything fired. Returns the number of rules
    /// fired; a tick no rule watches is a cheap no-op.
    pub fn on_tick(&mut self, tick: &PriceTick) -> usize {
        let fired =
            self.alert_service
                .evaluate_tick(&mut self.state, tick, &mut self.notification_service);
        if fired > 0 {
            self.persist();
        }
        fired
    }

    /// Evaluate one technical snapshot against every technical rule.
    pub fn on_snapshot(&mut self, snapshot: &TechnicalSnapshot) -> usize {
        let fired = self.alert_service.evaluate_snapshot(
            &mut self.state,
            snapshot,
            &mut self.notification_service,
        );
        if fired > 0 {
            self.persist();
        }
        fired
    }

    /// Evaluate one news item against every news rule. News rules do
    /// not latch, so repeated matching items keep firing.
    pub fn on_news(&mut self, item: &NewsItem) -> usize {
        let fired =
            self.alert_service
                .evaluate_news(&mut self.state, item, &mut self.notification_service);
        if fired > 0 {
            self.persist();
        }
        fired
    }

    // ── Rule Management ─────────────────────────────────────────────

    /// Register a price rule. Rejects blank symbols and non-finite
    /// thresholds. Returns its id.
    pub fn add_price_alert(&mut self, alert: PriceAlert) -> Result<Uuid, CoreError> {
        let id = self.alert_service.add_price_alert(&mut self.state, alert)?;
        self.persist();
        Ok(id)
    }

    /// Register a technical rule. Rejects blank symbols and non-finite
    /// parameters. Returns its id.
    pub fn add_technical_alert(&mut self, alert: TechnicalAlert) -> Result<Uuid, CoreError> {
        let id = self
            .alert_service
            .add_technical_alert(&mut self.state, alert)?;
        self.persist();
        Ok(id)
    }

    /// Register a news rule. Rejects blank symbol entries. Returns its id.
    pub fn add_news_alert(&mut self, alert: NewsAlert) -> Result<Uuid, CoreError> {
        let id = self.alert_service.add_news_alert(&mut self.state, alert)?;
        self.persist();
        Ok(id)
    }

    /// Flip a rule's active flag. Returns false for an unknown id.
    pub fn toggle_alert(&mut self, id: Uuid, kind: AlertKind) -> bool {
        let changed = self.alert_service.toggle_alert(&mut self.state, id, kind);
        if changed {
            self.persist();
        }
        changed
    }

    /// Remove a rule. Returns false for an unknown id.
    pub fn remove_alert(&mut self, id: Uuid, kind: AlertKind) -> bool {
        let removed = self.alert_service.remove_alert(&mut self.state, id, kind);
        if removed {
            self.persist();
        }
        removed
    }

    /// Remove every latched rule in one sweep. Returns how many were
    /// dropped.
    pub fn clear_triggered(&mut self) -> usize {
        let removed = self.alert_service.clear_triggered(&mut self.state);
        if removed > 0 {
            self.persist();
        }
        removed
    }

    #[must_use]
    pub fn price_alerts(&self) -> &[PriceAlert] {
        &self.state.price_alerts
    }

    #[must_use]
    pub fn technical_alerts(&self) -> &[TechnicalAlert] {
        &self.state.technical_alerts
    }

    #[must_use]
    pub fn news_alerts(&self) -> &[NewsAlert] {
        &self.state.news_alerts
    }

    #[must_use]
    pub fn get_price_alert(&self, id: Uuid) -> Option<&PriceAlert> {
        self.state.price_alerts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn get_technical_alert(&self, id: Uuid) -> Option<&TechnicalAlert> {
        self.state.technical_alerts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn get_news_alert(&self, id: Uuid) -> Option<&NewsAlert> {
        self.state.news_alerts.iter().find(|a| a.id == id)
    }

    /// Total rule count across all families.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.state.alert_count()
    }

    #[must_use]
    pub fn active_alert_count(&self) -> usize {
        self.state.active_alert_count()
    }

    #[must_use]
    pub fn triggered_count(&self) -> usize {
        self.state.triggered_count()
    }

    // ── Notification Center ─────────────────────────────────────────

    /// All notifications, newest first.
    #[must_use]
    pub fn notifications(&self) -> &[Notification] {
        &self.state.notifications
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.state.unread_count()
    }

    /// Mark one notification read. Returns false for an unknown id.
    pub fn mark_notification_read(&mut self, id: Uuid) -> bool {
        let changed = self.state.mark_notification_read(id);
        if changed {
            self.persist();
        }
        changed
    }

    pub fn clear_notifications(&mut self) {
        if self.state.notifications.is_empty() {
            return;
        }
        self.state.clear_notifications();
        self.persist();
    }

    /// Push a system notification through the full delivery path to
    /// verify channels end to end. Returns its id.
    pub fn send_test_notification(&mut self) -> Uuid {
        let notification = self.notification_service.dispatch_test();
        let id = notification.id;
        self.state.push_notification(notification);
        self.persist();
        id
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn settings(&self) -> &AlertSettings {
        &self.state.settings
    }

    /// Apply a partial settings update. A lowered notification cap
    /// evicts immediately; channel toggles take effect before the next
    /// fire.
    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.state.settings.apply(&update);
        self.state.enforce_notification_cap();
        self.notification_service.configure(&self.state.settings);
        self.persist();
    }

    // ── Snapshots ───────────────────────────────────────────────────

    /// Serialize the current state to portable snapshot bytes, the same
    /// encoding the store receives.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        StorageManager::save_to_bytes(&self.state)
    }

    /// Export the full state as pretty-printed JSON for inspection or
    /// host-side display.
    pub fn export_state_json(&self) -> Result<String, CoreError> {
        serde_json::to_string_pretty(&self.state)
            .map_err(|e| CoreError::Serialization(format!("Failed to export state: {e}")))
    }

    /// Write-through persistence. A failed write is logged and dropped:
    /// the worst outcome is stale state on the next load, never a
    /// crashed engine mid-evaluation.
    fn persist(&mut self) {
        let bytes = match StorageManager::save_to_bytes(&self.state) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not serialize alert state: {e}");
                return;
            }
        };
        if let Err(e) = self.store.save(&bytes) {
            warn!("could not persist alert state: {e}");
        }
    }
}

impl Default for StockWatch {
    fn default() -> Self {
        Self::new()
    }
}
