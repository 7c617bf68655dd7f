//! Runs `git` subprocesses to read the latest commit and its diff.

use std::env;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use chrono::Local;
use tracing::debug;

use crate::git::{CommitInfo, DateSource, GitError, TIMESTAMP_FORMAT};

/// Repository name used when the working directory cannot be resolved.
pub const FALLBACK_REPO_NAME: &str = "git project";

/// Source of the commit being reported on.
///
/// [`GitInspector`] is the production implementation; tests substitute
/// canned commits.
pub trait CommitSource {
    /// Returns the unified diff between `HEAD^` and `HEAD`.
    fn diff(&self) -> Result<String>;

    /// Returns metadata for `HEAD`.
    fn commit_info(&self) -> Result<CommitInfo>;
}

/// Reads commit data by shelling out to `git` in a working directory.
#[derive(Debug, Clone)]
pub struct GitInspector {
    workdir: PathBuf,
    repo_name: String,
    date_source: DateSource,
}

impl GitInspector {
    /// Creates an inspector for the process's current directory.
    pub fn current(date_source: DateSource) -> Self {
        match env::current_dir() {
            Ok(dir) => Self::at(dir, date_source),
            Err(e) => {
                debug!(error = %e, "Could not resolve working directory");
                Self {
                    workdir: PathBuf::from("."),
                    repo_name: FALLBACK_REPO_NAME.to_string(),
                    date_source,
                }
            }
        }
    }

    /// Creates an inspector for `workdir`.
    pub fn at<P: AsRef<Path>>(workdir: P, date_source: DateSource) -> Self {
        let workdir = workdir.as_ref().to_path_buf();
        let repo_name = workdir
            .file_name()
            .map(|name| name.to_string_lossy().trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| FALLBACK_REPO_NAME.to_string());

        Self {
            workdir,
            repo_name,
            date_source,
        }
    }

    /// Repository name reported on entries.
    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Runs git with `args` and returns stdout followed by stderr.
    fn run_git(&self, args: &[&str]) -> Result<String, GitError> {
        let joined = args.join(" ");
        debug!(args = %joined, workdir = %self.workdir.display(), "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .map_err(|source| GitError::Spawn {
                args: joined.clone(),
                source,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(GitError::CommandFailed {
                args: joined,
                output: combined.trim().to_string(),
            });
        }

        Ok(combined)
    }

    /// Formats the timestamp for the entry according to the date source.
    fn timestamp(&self) -> Result<String, GitError> {
        match self.date_source {
            DateSource::Report => Ok(Local::now().format(TIMESTAMP_FORMAT).to_string()),
            DateSource::Commit => {
                let date_arg = format!("--date=format:{TIMESTAMP_FORMAT}");
                let date = self.run_git(&["log", "-1", "--pretty=%cd", &date_arg])?;
                Ok(date.trim().to_string())
            }
        }
    }
}

impl CommitSource for GitInspector {
    fn diff(&self) -> Result<String> {
        Ok(self.run_git(&["diff", "HEAD^", "HEAD"])?)
    }

    fn commit_info(&self) -> Result<CommitInfo> {
        let message = self.run_git(&["log", "-1", "--pretty=%B"])?;
        let hash = commit_hash(&self.run_git(&["log", "-1", "--pretty=%H"])?)?;

        Ok(CommitInfo {
            message: message.trim().to_string(),
            hash,
            timestamp: self.timestamp()?,
            repo_name: self.repo_name.clone(),
        })
    }
}

/// Extracts the hash from `git log --pretty=%H` output.
fn commit_hash(output: &str) -> Result<String, GitError> {
    let hash = output.trim();
    if hash.is_empty() {
        return Err(GitError::MissingCommitHash);
    }
    Ok(hash.to_string())
}
