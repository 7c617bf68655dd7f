//! # git-daily-report
//!
//! A git post-commit hook that asks a language model to describe the latest
//! commit in business terms and appends the answer to a per-day markdown
//! report, at most once per commit hash.
//!
//! ## Pipeline
//!
//! 1. [`git::GitInspector`] reads `git diff HEAD^ HEAD` and the HEAD message
//!    and hash.
//! 2. [`report::ReportStore`] checks whether today's report already mentions
//!    the hash.
//! 3. [`analysis::CommitAnalyzer`] sends the message and diff to an
//!    OpenAI-compatible `/chat/completions` endpoint.
//! 4. The reply is written under the repository's `### Repo:` header.
//!
//! [`pipeline::Pipeline`] runs these steps and reports a
//! [`pipeline::Outcome`].

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod analysis;
pub mod cli;
pub mod config;
pub mod git;
pub mod pipeline;
pub mod report;

pub use crate::cli::Cli;
pub use crate::pipeline::{ErrorKind, Outcome, Pipeline};

/// The current version of git-daily-report.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
