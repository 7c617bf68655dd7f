//! Git-specific error handling.

use thiserror::Error;

/// Errors raised while querying the local repository.
#[derive(Error, Debug)]
pub enum GitError {
    /// The `git` binary could not be started.
    #[error("Failed to run git {args}: {source}")]
    Spawn {
        /// Arguments passed to git.
        args: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A git command exited with a non-zero status.
    #[error("git {args} failed: {output}")]
    CommandFailed {
        /// Arguments passed to git.
        args: String,
        /// Combined stdout and stderr of the failed command.
        output: String,
    },

    /// `git log` produced no commit hash.
    #[error("No commit hash found for HEAD")]
    MissingCommitHash,
}
