use crate::history::HistoryStore;
use crate::summarizer::Summarizer;
use crate::types::{Article, Result};
use chrono::NaiveDate;
use tracing::{debug, error};

/// How many raw articles ride along in a persisted digest for the dashboard.
pub const RAW_ARTICLE_SAMPLE: usize = 20;

/// What one update run amounted to.
#[derive(Debug)]
pub enum RunOutcome {
    /// Digest generated and persisted.
    Completed { date: NaiveDate, articles: usize },
    /// Nothing collected; no request made, nothing written.
    NoArticles,
    /// Summarization failed; nothing written.
    DigestFailed,
}

/// Drive one update over an already-collected batch: summarize, attach the
/// raw-article sample, persist. Empty input returns before the summarizer is
/// invoked; a summarization failure returns before the store is touched.
pub async fn run(
    articles: Vec<Article>,
    summarizer: &dyn Summarizer,
    store: &HistoryStore,
) -> Result<RunOutcome> {
    if articles.is_empty() {
        return Ok(RunOutcome::NoArticles);
    }

    let mut digest = match summarizer.summarize(&articles).await {
        Ok(digest) => digest,
        Err(e) => {
            error!("Error calling Claude API: {}", e);
            return Ok(RunOutcome::DigestFailed);
        }
    };

    // Keep the top of the batch for dashboard display; podcasts sit at the
    // front of the ordering, so they survive the cut
    digest.raw_articles = articles.iter().take(RAW_ARTICLE_SAMPLE).cloned().collect();

    if let Ok(preview) = serde_json::to_string_pretty(&digest) {
        debug!("Digest preview:\n{}", preview);
    }

    let date = digest.date;
    store.save(digest).await?;

    Ok(RunOutcome::Completed {
        date,
        articles: articles.len(),
    })
}
