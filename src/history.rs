use crate::types::{Digest, Result, TrackerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Maximum digests retained, newest first.
pub const MAX_HISTORY_ENTRIES: usize = 90;

/// File name of the history document inside the data directory.
pub const HISTORY_FILE: &str = "summaries.json";

/// Durable digest collection, newest first, as persisted on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub summaries: Vec<Digest>,
}

/// Read-modify-write store for the digest history file. The dashboard reads
/// the same file, so writes must never leave it half-written.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Store backed by `summaries.json` inside the given data directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted history; a missing file is an empty history. A
    /// file that exists but does not parse aborts the run, so a later save
    /// cannot clobber whatever is still in it.
    pub async fn load(&self) -> Result<History> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|e| TrackerError::CorruptHistory {
                    path: self.path.clone(),
                    source: e,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(History::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Merge a digest into the history and persist it: any digest already
    /// stored under the same date is replaced, the new digest goes to the
    /// front, and the history is truncated to `MAX_HISTORY_ENTRIES`. Safe to
    /// call repeatedly with the same date.
    pub async fn save(&self, digest: Digest) -> Result<History> {
        let mut history = self.load().await?;

        history.summaries.retain(|d| d.date != digest.date);
        history.summaries.insert(0, digest);
        history.summaries.truncate(MAX_HISTORY_ENTRIES);

        self.write(&history).await?;

        info!("Summary saved to {}", self.path.display());
        Ok(history)
    }

    /// Write the full document atomically: temp file in the same directory,
    /// then rename over the target.
    async fn write(&self, history: &History) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(history)?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &json).await?;
        tokio::fs::rename(&tmp_path, &self.path).await?;

        debug!(
            "Wrote {} digests to {}",
            history.summaries.len(),
            self.path.display()
        );
        Ok(())
    }
}
