//! Per-day markdown report files, deduplicated by commit hash.

pub mod entry;
pub mod store;

pub use entry::{repo_header, title_line, ReportEntry};
pub use store::ReportStore;
