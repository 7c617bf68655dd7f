//! Commit-to-report pipeline.
//!
//! Runs the stages in order and stops at the first one that has nothing more
//! to do: empty diff, unreadable commit, duplicate hash, failed or empty
//! analysis. The result is an [`Outcome`]; deciding what to print and which
//! exit code to use is left to the caller.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Error};
use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::analysis::CommitAnalyzer;
use crate::config::Config;
use crate::git::CommitSource;
use crate::report::{ReportEntry, ReportStore};

/// Failure classes of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// git missing, not a repository, or no parent commit.
    Environment,
    /// Analysis failed while the configuration had empty required fields.
    Configuration,
    /// Request failed, non-200 status, or unusable response.
    Api,
    /// Report file could not be read or written.
    Storage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Environment => write!(f, "environment"),
            Self::Configuration => write!(f, "configuration"),
            Self::Api => write!(f, "api"),
            Self::Storage => write!(f, "storage"),
        }
    }
}

/// Terminal state of one pipeline run.
#[derive(Debug)]
pub enum Outcome {
    /// An entry was written.
    Completed {
        /// Report file that received the entry.
        path: PathBuf,
        /// Hash of the recorded commit.
        hash: String,
    },
    /// The diff was empty or could not be produced.
    SkippedEmptyDiff,
    /// The report already mentions the commit.
    SkippedDuplicate {
        /// Hash of the commit.
        hash: String,
    },
    /// The model returned only whitespace.
    SkippedEmptyAnalysis {
        /// Hash of the commit.
        hash: String,
    },
    /// A stage failed.
    Failed {
        /// Failure class.
        kind: ErrorKind,
        /// The error, with the failing stage as outermost context.
        error: Error,
    },
}

impl Outcome {
    /// Returns true for [`Outcome::Failed`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    fn failed(kind: ErrorKind, error: Error) -> Self {
        info!(%kind, error = %format!("{error:#}"), "Report pipeline failed");
        Self::Failed { kind, error }
    }
}

/// One status line per outcome.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed { path, hash } => {
                write!(f, "Recorded commit {hash} in {}", path.display())
            }
            Self::SkippedEmptyDiff => write!(f, "No diff content found. Skipping analysis."),
            Self::SkippedDuplicate { hash } => write!(f, "Commit already recorded: {hash}"),
            Self::SkippedEmptyAnalysis { hash } => {
                write!(f, "Analysis is empty for commit {hash}. Skipping report update.")
            }
            Self::Failed { error, .. } => write!(f, "{error:#}"),
        }
    }
}

/// Sequences git inspection, dedup, analysis and the report update.
pub struct Pipeline<S> {
    source: S,
    store: ReportStore,
    analyzer: CommitAnalyzer,
    config_incomplete: bool,
}

impl<S: CommitSource> Pipeline<S> {
    /// Creates a pipeline from its collaborators.
    pub fn new(source: S, store: ReportStore, analyzer: CommitAnalyzer) -> Self {
        Self {
            source,
            store,
            analyzer,
            config_incomplete: false,
        }
    }

    /// Creates a pipeline using the report directory and endpoint in `config`.
    pub fn from_config(config: &Config, source: S) -> Self {
        Self {
            source,
            store: ReportStore::new(config.report_dir()),
            analyzer: CommitAnalyzer::from_config(config),
            config_incomplete: !config.missing_endpoint_fields().is_empty(),
        }
    }

    /// Runs the pipeline against today's report file.
    pub async fn run(&self) -> Outcome {
        self.run_on(Local::now().date_naive()).await
    }

    /// Runs the pipeline against the report file for `date`.
    pub async fn run_on(&self, date: NaiveDate) -> Outcome {
        let report_path = self.store.report_path(date);
        debug!(path = %report_path.display(), "Resolved daily report path");

        let diff = match self.source.diff() {
            Ok(diff) if !diff.trim().is_empty() => diff,
            Ok(_) => {
                info!("Diff is empty");
                return Outcome::SkippedEmptyDiff;
            }
            Err(e) => {
                info!(error = %format!("{e:#}"), "No diff available");
                return Outcome::SkippedEmptyDiff;
            }
        };

        let commit = match self
            .source
            .commit_info()
            .context("Failed to get commit info")
        {
            Ok(commit) => commit,
            Err(e) => return Outcome::failed(ErrorKind::Environment, e),
        };

        let path = match self
            .store
            .ensure_file(date)
            .context("Failed to create daily report file")
        {
            Ok(path) => path,
            Err(e) => return Outcome::failed(ErrorKind::Storage, e),
        };

        match self
            .store
            .contains_commit(&path, &commit.hash)
            .context("Failed to read daily report file")
        {
            Ok(true) => {
                info!(hash = %commit.hash, "Commit already recorded");
                return Outcome::SkippedDuplicate { hash: commit.hash };
            }
            Ok(false) => {}
            Err(e) => return Outcome::failed(ErrorKind::Storage, e),
        }

        let analysis = match self
            .analyzer
            .analyze(&commit.message, &diff)
            .await
            .context("Failed to fetch analysis")
        {
            Ok(analysis) => analysis,
            Err(e) => {
                let kind = if self.config_incomplete {
                    ErrorKind::Configuration
                } else {
                    ErrorKind::Api
                };
                return Outcome::failed(kind, e);
            }
        };

        if analysis.trim().is_empty() {
            info!(hash = %commit.hash, "Model returned an empty analysis");
            return Outcome::SkippedEmptyAnalysis { hash: commit.hash };
        }

        let entry = ReportEntry::new(&commit, analysis);
        if let Err(e) = self
            .store
            .append(&path, &entry)
            .context("Failed to append to report file")
        {
            return Outcome::failed(ErrorKind::Storage, e);
        }

        info!(hash = %commit.hash, path = %path.display(), "Recorded commit");
        Outcome::Completed {
            path,
            hash: commit.hash,
        }
    }
}
