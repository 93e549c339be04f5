use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::news::Sentiment;
use crate::models::rule::AlertPriority;

/// What produced a notification. Mirrors the rule families, plus
/// `System` for engine-generated entries such as test notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationCategory {
    Price,
    Technical,
    News,
    System,
}

impl std::fmt::Display for NotificationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NotificationCategory::Price => "Price",
            NotificationCategory::Technical => "Technical",
            NotificationCategory::News => "News",
            NotificationCategory::System => "System",
        };
        write!(f, "{name}")
    }
}

/// Market context captured when the notification was created, for
/// hosts that render richer cards than title and message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationContext {
    Price {
        symbol: String,
        price: f64,
        change_percent: f64,
    },
    Technical {
        symbol: String,
        rsi: f64,
        macd: f64,
        signal: f64,
    },
    News {
        symbols: Vec<String>,
        sentiment: Sentiment,
        headline: String,
    },
}

/// One entry in the notification center. Immutable once created apart
/// from the `read` flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    /// Rule that fired this notification; `None` for system entries.
    pub rule_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub category: NotificationCategory,
    pub priority: AlertPriority,
    pub created_at: DateTime<Utc>,
    pub read: bool,
    #[serde(default)]
    pub context: Option<NotificationContext>,
}

impl Notification {
    pub fn new(
        rule_id: Option<Uuid>,
        title: impl Into<String>,
        message: impl Into<String>,
        category: NotificationCategory,
        priority: AlertPriority,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            rule_id,
            title: title.into(),
            message: message.into(),
            category,
            priority,
            created_at: Utc::now(),
            read: false,
            context: None,
        }
    }

    #[must_use]
    pub fn with_context(mut self, context: NotificationContext) -> Self {
        self.context = Some(context);
        self
    }
}
