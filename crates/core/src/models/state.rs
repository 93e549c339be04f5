use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::notification::Notification;
use crate::models::rule::{NewsAlert, PriceAlert, TechnicalAlert};
use crate::models::settings::AlertSettings;

/// Root aggregate: every rule list, the notification center, and the
/// global settings. This is the unit of persistence; the whole struct
/// is serialized after each mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertState {
    pub price_alerts: Vec<PriceAlert>,
    pub technical_alerts: Vec<TechnicalAlert>,
    pub news_alerts: Vec<NewsAlert>,
    /// Newest first; capped at `settings.max_notifications`.
    pub notifications: Vec<Notification>,
    pub settings: AlertSettings,
}

impl Default for AlertState {
    fn default() -> Self {
        Self {
            price_alerts: Vec::new(),
            technical_alerts: Vec::new(),
            news_alerts: Vec::new(),
            notifications: Vec::new(),
            settings: AlertSettings::default(),
        }
    }
}

impl AlertState {
    /// Prepend a notification and evict past the cap. Newest entries sit
    /// at the front so hosts can render the list as-is.
    pub fn push_notification(&mut self, notification: Notification) {
        self.notifications.insert(0, notification);
        self.enforce_notification_cap();
    }

    /// Drop the oldest entries until the list fits the configured cap.
    /// Called after every push and after every settings change, so a
    /// lowered cap evicts immediately.
    pub fn enforce_notification_cap(&mut self) {
        self.notifications.truncate(self.settings.max_notifications);
    }

    #[must_use]
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.read).count()
    }

    /// Returns false when no notification has that id.
    pub fn mark_notification_read(&mut self, id: Uuid) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    pub fn clear_notifications(&mut self) {
        self.notifications.clear();
    }

    /// Total rule count across all three families.
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.price_alerts.len() + self.technical_alerts.len() + self.news_alerts.len()
    }

    #[must_use]
    pub fn active_alert_count(&self) -> usize {
        self.price_alerts.iter().filter(|a| a.active).count()
            + self.technical_alerts.iter().filter(|a| a.active).count()
            + self.news_alerts.iter().filter(|a| a.active).count()
    }

    /// Latched rules awaiting cleanup (news rules never latch).
    #[must_use]
    pub fn triggered_count(&self) -> usize {
        self.price_alerts.iter().filter(|a| a.triggered).count()
            + self.technical_alerts.iter().filter(|a| a.triggered).count()
    }
}
