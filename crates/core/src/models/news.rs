use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classified tone of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        };
        write!(f, "{name}")
    }
}

/// One headline from the news stream, tagged with the symbols it
/// mentions and a sentiment classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub symbols: Vec<String>,
    pub headline: String,
    pub summary: String,
    pub sentiment: Sentiment,
    pub timestamp: DateTime<Utc>,
}

impl NewsItem {
    pub fn new(
        symbols: Vec<String>,
        headline: impl Into<String>,
        summary: impl Into<String>,
        sentiment: Sentiment,
    ) -> Self {
        Self {
            symbols: symbols.into_iter().map(|s| s.to_uppercase()).collect(),
            headline: headline.into(),
            summary: summary.into(),
            sentiment,
            timestamp: Utc::now(),
        }
    }
}
