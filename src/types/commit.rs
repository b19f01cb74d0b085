use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single identified snapshot in a source-control history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    /// Full commit message; the first line is the summary shown in the UI.
    pub message: String,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
    #[serde(default)]
    pub committed_date: Option<DateTime<Utc>>,
}

impl Commit {
    /// Abbreviated sha for display.
    pub fn short_sha(&self) -> &str {
        let end = self
            .sha
            .char_indices()
            .nth(8)
            .map_or(self.sha.len(), |(i, _)| i);
        &self.sha[..end]
    }

    /// First line of the commit message.
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }
}
