use crate::types::Result;
use serde::Deserialize;
use std::path::Path;
use tracing::info;
use url::Url;

/// Sources treated as podcasts by exact name, on top of the substring rule.
const PODCAST_SOURCES: &[&str] = &["Lenny's Podcast", "Exponent"];

/// Default feed table: source name to feed URL.
const DEFAULT_FEEDS: &[(&str, &str)] = &[
    // Company blogs (direct sources)
    ("OpenAI", "https://openai.com/blog/rss"),
    ("Anthropic", "https://anthropic.com/news/rss"),
    ("Google AI", "https://blog.google/technology/ai/rss/"),
    ("Meta AI", "https://ai.meta.com/blog/rss/"),
    ("DeepMind", "https://deepmind.google/blog/rss.xml"),
    // Tech news sites
    (
        "TechCrunch AI",
        "https://techcrunch.com/tag/artificial-intelligence/feed/",
    ),
    (
        "The Verge AI",
        "https://www.theverge.com/ai-artificial-intelligence/rss/index.xml",
    ),
    ("VentureBeat AI", "https://venturebeat.com/ai/feed/"),
    (
        "Hacker News AI",
        "https://hnrss.org/newest?q=AI+OR+artificial+intelligence+OR+GPT+OR+LLM",
    ),
    (
        "MIT Tech Review AI",
        "https://www.technologyreview.com/topic/artificial-intelligence/feed",
    ),
    (
        "Ars Technica AI",
        "https://feeds.arstechnica.com/arstechnica/technology-lab",
    ),
    // Analysis & commentary
    ("Stratechery", "https://stratechery.com/feed/"),
    // Podcasts
    ("Lenny's Podcast", "https://api.substack.com/feed/podcast/10845.rss"),
    ("Exponent", "https://exponent.fm/feed/podcast/"),
    (
        "Stratechery Podcast",
        "https://stratechery.passport.online/feed/rss/CKPwgsS3gU25UpUSUBPAr",
    ),
    ("Lex Fridman Podcast", "https://lexfridman.com/feed/podcast/"),
    (
        "NVIDIA AI Podcast",
        "https://feeds.soundcloud.com/users/soundcloud:users:264034133/sounds.rss",
    ),
    ("Practical AI", "https://changelog.com/practicalai/feed"),
    ("The AI Daily Brief", "https://feeds.buzzsprout.com/2168220.rss"),
];

/// One feed endpoint with its human-readable source name.
#[derive(Debug, Clone)]
pub struct FeedSource {
    pub name: String,
    pub url: Url,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Result<Self> {
        Ok(Self {
            name: name.to_string(),
            url: Url::parse(url)?,
        })
    }

    /// Podcast sources keep their latest episodes regardless of the recency
    /// window. Classification is by name: substring "Podcast" or one of the
    /// known podcast names.
    pub fn is_podcast(&self) -> bool {
        self.name.contains("Podcast") || PODCAST_SOURCES.contains(&self.name.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: String,
    url: String,
}

/// Curated default feed set (company blogs, tech news, analysis, podcasts).
pub fn default_sources() -> Result<Vec<FeedSource>> {
    DEFAULT_FEEDS
        .iter()
        .map(|(name, url)| FeedSource::new(name, url))
        .collect()
}

/// Load a replacement feed table from a JSON file of `{"name", "url"}` pairs.
pub fn load_sources(path: &Path) -> Result<Vec<FeedSource>> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: Vec<RawSource> = serde_json::from_str(&raw)?;

    let sources = parsed
        .iter()
        .map(|s| FeedSource::new(&s.name, &s.url))
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Loaded {} feed sources from {}",
        sources.len(),
        path.display()
    );
    Ok(sources)
}
