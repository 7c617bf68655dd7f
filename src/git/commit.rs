//! Commit snapshot handed from the git layer to the report pipeline.

use serde::{Deserialize, Serialize};

/// Format of the `**Date:**` line in a report entry.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Immutable snapshot of the latest commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Full commit message, trimmed. May span several lines.
    pub message: String,
    /// Full hex commit id, trimmed.
    pub hash: String,
    /// Timestamp shown on the entry, formatted with [`TIMESTAMP_FORMAT`].
    pub timestamp: String,
    /// Basename of the working directory.
    pub repo_name: String,
}

/// Which clock supplies [`CommitInfo::timestamp`].
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DateSource {
    /// Wall-clock time at which the report entry is generated.
    #[default]
    Report,
    /// Committer date of HEAD.
    Commit,
}
