//! Read-only git queries against the repository in the working directory.

pub mod commit;
pub mod error;
pub mod inspector;

pub use commit::{CommitInfo, DateSource, TIMESTAMP_FORMAT};
pub use error::GitError;
pub use inspector::{CommitSource, GitInspector, FALLBACK_REPO_NAME};
