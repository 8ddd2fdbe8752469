use crate::feeds::FeedSource;
use crate::types::{Article, CollectorConfig, Result, TrackerError};
use chrono::{DateTime, Duration, Utc};
use feed_rs::model::{Entry, Feed};
use feed_rs::parser;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Maximum characters of feed summary carried into an Article.
pub const SUMMARY_MAX_CHARS: usize = 500;

/// Articles gathered from one or more feeds, podcast episodes kept apart
/// from dated news until the final ordering.
#[derive(Debug, Default)]
pub struct FeedScan {
    pub episodes: Vec<Article>,
    pub articles: Vec<Article>,
}

impl FeedScan {
    pub fn merge(&mut self, other: FeedScan) {
        self.episodes.extend(other.episodes);
        self.articles.extend(other.articles);
    }

    /// Final ordering: podcast episodes ahead of dated news, so consumers
    /// that truncate to a prefix still see podcast content.
    pub fn into_articles(self) -> Vec<Article> {
        let mut all = self.episodes;
        all.extend(self.articles);
        all
    }
}

pub struct ArticleCollector {
    client: Client,
    config: CollectorConfig,
}

impl ArticleCollector {
    pub fn new(config: CollectorConfig) -> Result<Self> {
        // Feed fetches bypass any configured proxy; the summarizer client is
        // unaffected.
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .no_proxy()
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch every source and return the combined article list, podcasts
    /// first. Failure is isolated per source: a dead or malformed feed is
    /// logged and skipped, never fatal to the run.
    pub async fn collect(&self, sources: &[FeedSource]) -> Vec<Article> {
        info!("Fetching articles from {} feeds", sources.len());

        let now = Utc::now();
        let cutoff = now - Duration::days(self.config.window_days);
        let mut scan = FeedScan::default();

        for source in sources {
            debug!("Fetching from {}", source.name);
            match self.fetch_feed(source).await {
                Ok(feed) => scan.merge(scan_feed(source, &feed, now, cutoff, &self.config)),
                Err(e) => warn!("Error fetching {}: {}", source.name, e),
            }
        }

        info!(
            "Fetched {} recent articles and {} podcast episodes",
            scan.articles.len(),
            scan.episodes.len()
        );
        scan.into_articles()
    }

    async fn fetch_feed(&self, source: &FeedSource) -> Result<Feed> {
        let response = self.client.get(source.url.clone()).send().await?;
        let body = response.error_for_status()?.bytes().await?;

        parser::parse(body.as_ref())
            .map_err(|e| TrackerError::Parse(format!("{}: {}", source.name, e)))
    }
}

/// Scan one parsed feed and bucket its entries per the inclusion policy:
/// podcast sources contribute their first entries scanned up to the episode
/// quota regardless of date, news sources contribute entries published on or
/// after `cutoff`. Only the first `max_entries_per_feed` entries are
/// considered at all.
pub fn scan_feed(
    source: &FeedSource,
    feed: &Feed,
    now: DateTime<Utc>,
    cutoff: DateTime<Utc>,
    config: &CollectorConfig,
) -> FeedScan {
    let mut scan = FeedScan::default();
    let is_podcast = source.is_podcast();

    for entry in feed.entries.iter().take(config.max_entries_per_feed) {
        let published = entry_timestamp(entry).unwrap_or(now);
        let article = Article {
            source: source.name.clone(),
            title: entry
                .title
                .as_ref()
                .map(|t| t.content.clone())
                .unwrap_or_default(),
            link: entry
                .links
                .first()
                .map(|l| l.href.clone())
                .unwrap_or_default(),
            summary: truncate_chars(&entry_summary(entry), SUMMARY_MAX_CHARS),
            published,
            is_podcast,
        };

        if is_podcast {
            // Latest episodes always make it in, up to the quota
            if scan.episodes.len() < config.podcast_episode_quota {
                scan.episodes.push(article);
            }
        } else if published >= cutoff {
            scan.articles.push(article);
        }
    }

    scan
}

/// Publication timestamp from entry metadata, preferring `published` over
/// `updated`. `None` when the feed carries neither; callers substitute the
/// collection time.
pub fn entry_timestamp(entry: &Entry) -> Option<DateTime<Utc>> {
    entry.published.or(entry.updated)
}

fn entry_summary(entry: &Entry) -> String {
    entry
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .or_else(|| entry.content.as_ref().and_then(|c| c.body.clone()))
        .unwrap_or_default()
}

/// Truncate to at most `max` characters, never splitting a char boundary.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
