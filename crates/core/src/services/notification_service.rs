use log::debug;

use crate::channels::silent::{SilentNotifier, SilentSound};
use crate::channels::traits::{DesktopNotifier, SoundPattern, SoundPlayer};
use crate::models::news::NewsItem;
use crate::models::notification::{Notification, NotificationCategory, NotificationContext};
use crate::models::rule::{AlertPriority, NewsAlert, PriceAlert, PriceAlertKind, TechnicalAlert};
use crate::models::settings::AlertSettings;
use crate::models::snapshot::TechnicalSnapshot;
use crate::models::tick::PriceTick;

/// Renders notifications for fired rules and fans them out to the
/// delivery channels.
///
/// A channel receives a notification only when both the rule's own
/// preference and the global settings toggle allow it. The service
/// keeps a runtime copy of the toggles; [`configure`] refreshes it on
/// load and after every settings update.
///
/// [`configure`]: NotificationService::configure
pub struct NotificationService {
    desktop: Box<dyn DesktopNotifier>,
    sound: Box<dyn SoundPlayer>,
    visual_enabled: bool,
    sound_enabled: bool,
    /// Permission is prompted for at most once per service instance.
    permission_requested: bool,
}

impl NotificationService {
    /// Service wired to the silent channels; rendering and history keep
    /// working, nothing is delivered.
    pub fn new() -> Self {
        Self::with_channels(Box::new(SilentNotifier), Box::new(SilentSound))
    }

    pub fn with_channels(desktop: Box<dyn DesktopNotifier>, sound: Box<dyn SoundPlayer>) -> Self {
        Self {
            desktop,
            sound,
            visual_enabled: true,
            sound_enabled: true,
            permission_requested: false,
        }
    }

    /// Pull the channel toggles out of the global settings so changes
    /// take effect before the next fire.
    pub fn configure(&mut self, settings: &AlertSettings) {
        self.visual_enabled = settings.visual_enabled;
        self.sound_enabled = settings.sound_enabled;
    }

    // ── Rendering and delivery ────────────────────────────────────────────

    pub fn dispatch_price(&mut self, alert: &PriceAlert, tick: &PriceTick) -> Notification {
        let message = alert
            .message
            .clone()
            .unwrap_or_else(|| default_price_message(alert, tick));
        let notification = Notification::new(
            Some(alert.id),
            format!("{} price alert", tick.symbol),
            message,
            NotificationCategory::Price,
            alert.priority,
        )
        .with_context(NotificationContext::Price {
            symbol: tick.symbol.clone(),
            price: tick.price,
            change_percent: tick.change_percent,
        });

        self.deliver(&notification, alert.prefs.visual, alert.prefs.sound);
        notification
    }

    pub fn dispatch_technical(
        &mut self,
        alert: &TechnicalAlert,
        snapshot: &TechnicalSnapshot,
    ) -> Notification {
        let message = alert
            .message
            .clone()
            .unwrap_or_else(|| format!("{}: {}", alert.symbol, alert.kind));
        let notification = Notification::new(
            Some(alert.id),
            format!("{} technical alert", snapshot.symbol),
            message,
            NotificationCategory::Technical,
            alert.priority,
        )
        .with_context(NotificationContext::Technical {
            symbol: snapshot.symbol.clone(),
            rsi: snapshot.rsi,
            macd: snapshot.macd.macd,
            signal: snapshot.macd.signal,
        });

        self.deliver(&notification, alert.prefs.visual, alert.prefs.sound);
        notification
    }

    pub fn dispatch_news(&mut self, alert: &NewsAlert, item: &NewsItem) -> Notification {
        let message = alert
            .message
            .clone()
            .unwrap_or_else(|| item.headline.clone());
        let title = match item.symbols.first() {
            Some(symbol) => format!("{symbol} news"),
            None => "Market news".to_string(),
        };
        let notification = Notification::new(
            Some(alert.id),
            title,
            message,
            NotificationCategory::News,
            alert.priority,
        )
        .with_context(NotificationContext::News {
            symbols: item.symbols.clone(),
            sentiment: item.sentiment,
            headline: item.headline.clone(),
        });

        self.deliver(&notification, alert.prefs.visual, alert.prefs.sound);
        notification
    }

    /// Manual end-to-end check of the delivery path, ignoring per-rule
    /// preferences (global toggles still apply).
    pub fn dispatch_test(&mut self) -> Notification {
        let notification = Notification::new(
            None,
            "Test notification",
            "Notifications are working",
            NotificationCategory::System,
            AlertPriority::Low,
        );
        self.deliver(&notification, true, true);
        notification
    }

    fn deliver(&mut self, notification: &Notification, rule_visual: bool, rule_sound: bool) {
        if rule_visual && self.visual_enabled && self.ensure_permission() {
            self.desktop.show(notification);
        }
        if rule_sound && self.sound_enabled {
            self.sound.play(sound_for(notification.priority));
        }
    }

    /// Lazy one-shot permission check. A denial downgrades the visual
    /// channel to a no-op without surfacing an error.
    fn ensure_permission(&mut self) -> bool {
        if self.desktop.permission_granted() {
            return true;
        }
        if self.permission_requested {
            return false;
        }

        self.permission_requested = true;
        let granted = self.desktop.request_permission();
        debug!("desktop notification permission requested, granted: {granted}");
        granted
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService")
            .field("visual_enabled", &self.visual_enabled)
            .field("sound_enabled", &self.sound_enabled)
            .field("permission_requested", &self.permission_requested)
            .finish()
    }
}

/// Priority to audio cue mapping.
#[must_use]
pub fn sound_for(priority: AlertPriority) -> SoundPattern {
    match priority {
        AlertPriority::Low => SoundPattern::Single,
        AlertPriority::Medium => SoundPattern::Double,
        AlertPriority::High => SoundPattern::Triple,
        AlertPriority::Critical => SoundPattern::Urgent,
    }
}

fn default_price_message(alert: &PriceAlert, tick: &PriceTick) -> String {
    match alert.kind {
        PriceAlertKind::Above => format!(
            "{} rose above {:.2} (now {:.2})",
            alert.symbol, alert.threshold, tick.price
        ),
        PriceAlertKind::Below => format!(
            "{} fell below {:.2} (now {:.2})",
            alert.symbol, alert.threshold, tick.price
        ),
        PriceAlertKind::PercentChange => {
            format!("{} moved {:+.2}% today", alert.symbol, tick.change_percent)
        }
        PriceAlertKind::VolumeSpike => {
            let ratio = tick.volume_ratio().unwrap_or(0.0);
            format!("{} volume at {:.1}x its average", alert.symbol, ratio)
        }
    }
}
