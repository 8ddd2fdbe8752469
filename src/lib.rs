pub mod collector;
pub mod feeds;
pub mod history;
pub mod pipeline;
pub mod summarizer;
pub mod types;

pub use collector::{ArticleCollector, FeedScan};
pub use feeds::{default_sources, load_sources, FeedSource};
pub use history::{History, HistoryStore, MAX_HISTORY_ENTRIES};
pub use pipeline::{run, RunOutcome};
pub use summarizer::{ClaudeSummarizer, MockSummarizer, Summarizer};
pub use types::*;
