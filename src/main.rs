use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use trends_tracker::summarizer::DEFAULT_MODEL;
use trends_tracker::{
    default_sources, load_sources, pipeline, ArticleCollector, ClaudeSummarizer, CollectorConfig,
    HistoryStore, RunOutcome, TrackerError,
};

/// Collect AI news and podcast feeds, summarize them with Claude, and roll
/// the digest into the dashboard history.
#[derive(Parser, Debug)]
#[command(name = "trends-tracker", version, about)]
struct Cli {
    /// Recency window for news articles, in days
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(i64).range(0..=3650))]
    days: i64,

    /// Entries scanned per feed
    #[arg(long, default_value_t = 15)]
    max_entries: usize,

    /// Podcast episodes always kept per source
    #[arg(long, default_value_t = 2)]
    podcast_episodes: usize,

    /// Directory the dashboard reads its data from
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON file of {"name", "url"} pairs replacing the default feed table
    #[arg(long)]
    feeds: Option<PathBuf>,

    /// Model used for summarization
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!("=== AI Trends Tracker - Update Script ===");

    // Check the credential before any network traffic
    let summarizer = match ClaudeSummarizer::from_env(cli.model.clone()) {
        Ok(summarizer) => summarizer,
        Err(TrackerError::MissingApiKey) => {
            error!("ANTHROPIC_API_KEY environment variable not set!");
            error!("Please set it with: export ANTHROPIC_API_KEY='your-key-here'");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let sources = match &cli.feeds {
        Some(path) => load_sources(path)?,
        None => default_sources()?,
    };

    let config = CollectorConfig {
        window_days: cli.days,
        max_entries_per_feed: cli.max_entries,
        podcast_episode_quota: cli.podcast_episodes,
        ..CollectorConfig::default()
    };

    let collector = ArticleCollector::new(config)?;
    let store = HistoryStore::new(&cli.data_dir);

    let articles = collector.collect(&sources).await;

    match pipeline::run(articles, &summarizer, &store).await? {
        RunOutcome::Completed { date, articles } => {
            info!("Digest for {} generated from {} articles", date, articles);
            info!(
                "Update complete! Dashboard data written to {}",
                store.path().display()
            );
        }
        RunOutcome::NoArticles => {
            info!("No recent articles found. Exiting.");
        }
        RunOutcome::DigestFailed => {
            error!("Failed to generate summary. Please check your API key and try again.");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["trends-tracker"]).unwrap();

        assert_eq!(cli.days, 10);
        assert_eq!(cli.max_entries, 15);
        assert_eq!(cli.podcast_episodes, 2);
        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert!(cli.feeds.is_none());
        assert_eq!(cli.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_cli_window_flag_is_bounded() {
        // Values past the bound would overflow chrono's day arithmetic
        let err = Cli::try_parse_from(["trends-tracker", "--days", "9223372036854775807"]);
        assert!(err.is_err());

        let err = Cli::try_parse_from(["trends-tracker", "--days", "-1"]);
        assert!(err.is_err());

        let cli = Cli::try_parse_from(["trends-tracker", "--days", "3650"]).unwrap();
        assert_eq!(cli.days, 3650);

        let cli = Cli::try_parse_from(["trends-tracker", "--days", "0"]).unwrap();
        assert_eq!(cli.days, 0);
    }
}
