use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::news::Sentiment;
use crate::models::tick::PriceTick;

// ── Shared rule vocabulary ─────────────────────────────────────────────────

/// Urgency attached to a rule, carried into every notification it fires.
/// Ordering is by severity, `Low < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum AlertPriority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for AlertPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlertPriority::Low => "Low",
            AlertPriority::Medium => "Medium",
            AlertPriority::High => "High",
            AlertPriority::Critical => "Critical",
        };
        write!(f, "{name}")
    }
}

/// Which rule family an id belongs to. Lifecycle operations (toggle,
/// remove) take this alongside the id since ids are only unique within
/// their family's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    Price,
    Technical,
    News,
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AlertKind::Price => "Price",
            AlertKind::Technical => "Technical",
            AlertKind::News => "News",
        };
        write!(f, "{name}")
    }
}

/// Per-rule delivery switches. Both channels are also gated by the
/// global settings, so `true` here means "allowed", not "guaranteed".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub visual: bool,
    pub sound: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            visual: true,
            sound: true,
        }
    }
}

// ── Price rules ────────────────────────────────────────────────────────────

/// Condition family for price rules. `Above`/`Below` compare the last
/// price to the threshold, `PercentChange` compares the absolute daily
/// move, `VolumeSpike` compares volume against its trailing average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceAlertKind {
    Above,
    Below,
    PercentChange,
    VolumeSpike,
}

impl std::fmt::Display for PriceAlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PriceAlertKind::Above => "Above",
            PriceAlertKind::Below => "Below",
            PriceAlertKind::PercentChange => "Percent change",
            PriceAlertKind::VolumeSpike => "Volume spike",
        };
        write!(f, "{name}")
    }
}

/// Market context captured at the moment a price rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTrigger {
    pub price: f64,
    pub change_percent: f64,
}

/// A one-shot rule over the live tick stream. Fires at most once: the
/// `triggered` latch stays set until the rule is removed or cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceAlert {
    pub id: Uuid,
    pub symbol: String,
    pub kind: PriceAlertKind,
    /// Price level, percent move, or volume ratio depending on `kind`.
    pub threshold: f64,
    pub active: bool,
    pub triggered: bool,
    pub created_at: DateTime<Utc>,
    pub triggered_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fired: Option<PriceTrigger>,
    pub prefs: NotificationPrefs,
    /// Custom notification text; `None` renders a default message.
    #[serde(default)]
    pub message: Option<String>,
    pub priority: AlertPriority,
}

impl PriceAlert {
    pub fn new(symbol: impl Into<String>, kind: PriceAlertKind, threshold: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            kind,
            threshold,
            active: true,
            triggered: false,
            created_at: Utc::now(),
            triggered_at: None,
            fired: None,
            prefs: NotificationPrefs::default(),
            message: None,
            priority: AlertPriority::default(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_prefs(mut self, prefs: NotificationPrefs) -> Self {
        self.prefs = prefs;
        self
    }

    /// Apply the trigger transition: set the latch and record the market
    /// context. The timestamp is written once and never overwritten.
    pub fn mark_triggered(&mut self, tick: &PriceTick) {
        self.triggered = true;
        if self.triggered_at.is_none() {
            self.triggered_at = Some(Utc::now());
        }
        self.fired = Some(PriceTrigger {
            price: tick.price,
            change_percent: tick.change_percent,
        });
    }
}

// ── Technical rules ────────────────────────────────────────────────────────

/// Condition family for indicator rules evaluated against technical
/// snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TechnicalAlertKind {
    RsiOverbought,
    RsiOversold,
    MacdCrossover,
    VolumeBreakout,
    SupportBreak,
    ResistanceBreak,
}

impl std::fmt::Display for TechnicalAlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TechnicalAlertKind::RsiOverbought => "RSI overbought",
            TechnicalAlertKind::RsiOversold => "RSI oversold",
            TechnicalAlertKind::MacdCrossover => "MACD crossover",
            TechnicalAlertKind::VolumeBreakout => "Volume breakout",
            TechnicalAlertKind::SupportBreak => "Support break",
            TechnicalAlertKind::ResistanceBreak => "Resistance break",
        };
        write!(f, "{name}")
    }
}

/// Optional per-rule parameters; evaluation falls back to standard
/// defaults for any field left unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TechnicalParams {
    /// RSI boundary for overbought/oversold rules.
    pub rsi_level: Option<f64>,
    /// Support or resistance price level.
    pub level: Option<f64>,
    /// Multiple of average volume for breakout rules.
    pub volume_multiplier: Option<f64>,
}

impl TechnicalParams {
    pub fn rsi(level: f64) -> Self {
        Self {
            rsi_level: Some(level),
            ..Self::default()
        }
    }

    pub fn level(level: f64) -> Self {
        Self {
            level: Some(level),
            ..Self::default()
        }
    }

    pub fn volume_multiplier(multiplier: f64) -> Self {
        Self {
            volume_multiplier: Some(multiplier),
            ..Self::default()
        }
    }
}

/// A one-shot rule over the technical snapshot stream. Latches exactly
/// like [`PriceAlert`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAlert {
    pub id: Uuid,
    pub symbol: String,
    pub kind: TechnicalAlertKind,
    pub params: TechnicalParams,
    pub active: bool,
    pub triggered: bool,
    pub created_at: DateTime<Utc>,
    pub triggered_at: Option<DateTime<Utc>>,
    pub prefs: NotificationPrefs,
    #[serde(default)]
    pub message: Option<String>,
    pub priority: AlertPriority,
}

impl TechnicalAlert {
    pub fn new(symbol: impl Into<String>, kind: TechnicalAlertKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.into().to_uppercase(),
            kind,
            params: TechnicalParams::default(),
            active: true,
            triggered: false,
            created_at: Utc::now(),
            triggered_at: None,
            prefs: NotificationPrefs::default(),
            message: None,
            priority: AlertPriority::default(),
        }
    }

    #[must_use]
    pub fn with_params(mut self, params: TechnicalParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_prefs(mut self, prefs: NotificationPrefs) -> Self {
        self.prefs = prefs;
        self
    }

    /// Set the latch. The timestamp is written once and never overwritten.
    pub fn mark_triggered(&mut self) {
        self.triggered = true;
        if self.triggered_at.is_none() {
            self.triggered_at = Some(Utc::now());
        }
    }
}

// ── News rules ─────────────────────────────────────────────────────────────

/// Sentiment gate on a news rule. `Any` accepts every sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SentimentFilter {
    Positive,
    Negative,
    Neutral,
    #[default]
    Any,
}

impl SentimentFilter {
    #[must_use]
    pub fn matches(&self, sentiment: Sentiment) -> bool {
        match self {
            SentimentFilter::Any => true,
            SentimentFilter::Positive => sentiment == Sentiment::Positive,
            SentimentFilter::Negative => sentiment == Sentiment::Negative,
            SentimentFilter::Neutral => sentiment == Sentiment::Neutral,
        }
    }
}

impl std::fmt::Display for SentimentFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SentimentFilter::Positive => "Positive",
            SentimentFilter::Negative => "Negative",
            SentimentFilter::Neutral => "Neutral",
            SentimentFilter::Any => "Any",
        };
        write!(f, "{name}")
    }
}

/// A standing keyword watch over the news stream. Unlike price and
/// technical rules there is no latch: every matching item fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsAlert {
    pub id: Uuid,
    /// Symbols this rule watches; empty means any symbol.
    pub symbols: Vec<String>,
    /// Keywords matched case-insensitively against headline and summary.
    /// An empty list matches nothing.
    pub keywords: Vec<String>,
    pub sentiment: SentimentFilter,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub prefs: NotificationPrefs,
    #[serde(default)]
    pub message: Option<String>,
    pub priority: AlertPriority,
}

impl NewsAlert {
    pub fn new(symbols: Vec<String>, keywords: Vec<String>, sentiment: SentimentFilter) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbols: symbols.into_iter().map(|s| s.to_uppercase()).collect(),
            keywords,
            sentiment,
            active: true,
            created_at: Utc::now(),
            prefs: NotificationPrefs::default(),
            message: None,
            priority: AlertPriority::default(),
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_priority(mut self, priority: AlertPriority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_prefs(mut self, prefs: NotificationPrefs) -> Self {
        self.prefs = prefs;
        self
    }
}
