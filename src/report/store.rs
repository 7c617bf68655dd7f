//! Append-only ledger of report entries, one markdown file per day.
//!
//! Every operation reads and rewrites the whole file. This assumes a single
//! writer per report file: two hook runs racing on the same day can both pass
//! [`ReportStore::contains_commit`], and the later rewrite wins.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::{debug, info};

use crate::report::entry::{title_line, ReportEntry};

/// Locates and updates the daily report files in one directory.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
}

impl ReportStore {
    /// Creates a store rooted at `dir`.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the report file for `date`: `<dir>/git_report_<YYYY-MM-DD>.md`.
    pub fn report_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("git_report_{}.md", date.format("%Y-%m-%d")))
    }

    /// Creates the report file for `date` with its title line, unless it
    /// already exists. Never truncates an existing file.
    pub fn ensure_file(&self, date: NaiveDate) -> Result<PathBuf> {
        let path = self.report_path(date);
        if path.exists() {
            return Ok(path);
        }

        if !self.dir.as_os_str().is_empty() && !self.dir.exists() {
            fs::create_dir_all(&self.dir).with_context(|| {
                format!("Failed to create report directory: {}", self.dir.display())
            })?;
        }

        let title = title_line(&date.format("%Y-%m-%d").to_string());
        fs::write(&path, title)
            .with_context(|| format!("Failed to create report file: {}", path.display()))?;

        info!(path = %path.display(), "Created daily report file");
        Ok(path)
    }

    /// Returns true if the report file contains `hash` anywhere.
    ///
    /// A missing file contains nothing.
    pub fn contains_commit(&self, path: &Path, hash: &str) -> Result<bool> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(content.contains(hash)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to read report file: {}", path.display())),
        }
    }

    /// Adds `entry` to the report file.
    ///
    /// The entry goes directly under its repository header if the file has
    /// one, so the newest commit of a repository comes first. Otherwise a new
    /// header and the entry are appended at the end of the file.
    pub fn append(&self, path: &Path, entry: &ReportEntry) -> Result<()> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => String::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read report file: {}", path.display()))
            }
        };

        let updated = insert_entry(&content, entry);

        fs::write(path, updated)
            .with_context(|| format!("Failed to write report file: {}", path.display()))?;

        debug!(
            path = %path.display(),
            hash = %entry.commit_hash,
            repo = %entry.repo_name,
            "Appended report entry"
        );
        Ok(())
    }
}

/// Returns `content` with `entry` placed under its repository header.
fn insert_entry(content: &str, entry: &ReportEntry) -> String {
    let header = entry.repo_header();
    let block = entry.to_string();

    match find_header_line_end(content, &header) {
        Some(end) => {
            let mut updated = String::with_capacity(content.len() + block.len() + 1);
            updated.push_str(&content[..end]);
            updated.push('\n');
            updated.push_str(&block);
            updated.push_str(&content[end..]);
            updated
        }
        None => format!("{content}\n{header}\n{block}"),
    }
}

/// Finds the first line equal to `header` and returns the byte offset just
/// past the header text (before its line break).
fn find_header_line_end(content: &str, header: &str) -> Option<usize> {
    content.match_indices(header).find_map(|(start, _)| {
        let end = start + header.len();
        let starts_line = start == 0 || content[..start].ends_with('\n');
        let rest = &content[end..];
        let ends_line = rest.is_empty() || rest.starts_with('\n') || rest.starts_with("\r\n");
        (starts_line && ends_line).then_some(end)
    })
}
