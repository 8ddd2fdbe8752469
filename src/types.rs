use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One normalized feed entry, ready for summarization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub title: String,
    pub link: String,
    pub summary: String,
    pub published: DateTime<Utc>,
    #[serde(default)]
    pub is_podcast: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PodcastHighlight {
    pub title: String,
    pub source: String,
    pub key_points: Vec<String>,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFeature {
    pub company: String,
    pub feature: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FundraisingRound {
    pub company: String,
    pub amount: String,
    pub details: String,
}

/// Structured daily summary returned by the summarizer, plus a sample of the
/// raw articles it was generated from. `date` is the unique key in history;
/// everything else tolerates absence in the model's reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Digest {
    pub date: NaiveDate,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub podcast_highlights: Vec<PodcastHighlight>,
    #[serde(default)]
    pub top_features: Vec<ProductFeature>,
    #[serde(default)]
    pub fintech_trends: Vec<String>,
    #[serde(default)]
    pub fundraising: Vec<FundraisingRound>,
    #[serde(default)]
    pub raw_articles: Vec<Article>,
}

impl Digest {
    /// Digest for a given date with all content fields blank.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            summary: String::new(),
            podcast_highlights: Vec::new(),
            top_features: Vec::new(),
            fintech_trends: Vec::new(),
            fundraising: Vec::new(),
            raw_articles: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectorConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub window_days: i64,
    pub max_entries_per_feed: usize,
    pub podcast_episode_quota: usize,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            // Browser-like agent, some feed hosts block obvious bots
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
                .to_string(),
            timeout_seconds: 10,
            window_days: 10,
            max_entries_per_feed: 15,
            podcast_episode_quota: 2,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("ANTHROPIC_API_KEY environment variable not set")]
    MissingApiKey,

    #[error("Summarizer returned no usable content")]
    EmptyCompletion,

    #[error("Summarizer reply is not a valid digest: {0}")]
    DigestParse(#[source] serde_json::Error),

    #[error("History file {} is corrupt: {}", .path.display(), .source)]
    CorruptHistory {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrackerError>;
