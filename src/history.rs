//! Flat JSON-array log of completed translate-and-speak requests.

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// One completed request, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Local time, `%Y-%m-%d %H:%M:%S`
    #[serde(rename = "time")]
    pub timestamp: String,
    #[serde(rename = "input")]
    pub input_text: String,
    #[serde(rename = "output")]
    pub output_text: String,
    #[serde(rename = "target")]
    pub target_code: String,
    #[serde(rename = "provider")]
    pub provider_name: String,
    /// Seconds spent translating, rounded to 2 decimals
    #[serde(rename = "elapsed")]
    pub elapsed_seconds: f64,
}

impl HistoryEntry {
    /// Build an entry stamped with the current local time.
    pub fn now(input: &str, output: &str, target: &str, provider: &str, elapsed_seconds: f64) -> Self {
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_text: input.to_string(),
            output_text: output.to_string(),
            target_code: target.to_string(),
            provider_name: provider.to_string(),
            elapsed_seconds,
        }
    }
}

/// The history file. Every append rewrites the whole array.
pub struct HistoryLog {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process only
    write_lock: Mutex<()>,
}

impl HistoryLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Append one entry.
    ///
    /// A missing or unparseable file is treated as an empty log. Existing
    /// elements are written back untouched. Write failures are returned.
    pub async fn append(&self, entry: &HistoryEntry) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        let mut history = self.read_raw().await;
        history.push(serde_json::to_value(entry).context("Failed to serialize history entry")?);

        let json = serde_json::to_string_pretty(&history).context("Failed to serialize history")?;
        tokio::fs::write(&self.path, json)
            .await
            .context(format!("Failed to write history to {}", self.path.display()))?;

        debug!("History now holds {} entries", history.len());
        Ok(())
    }

    /// Read the file as a JSON array, falling back to empty on any problem.
    async fn read_raw(&self) -> Vec<serde_json::Value> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!("Could not read history at {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(history) => history,
            Err(e) => {
                warn!("History at {} is not a JSON array, starting over: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }
}
