//! Markdown layout of a report file.

use std::fmt;

use crate::git::CommitInfo;

/// Returns the title line written at the top of a new report file.
pub fn title_line(date: &str) -> String {
    format!("# Daily Git Report - {date}\n")
}

/// Returns the header that groups entries of one repository.
pub fn repo_header(repo_name: &str) -> String {
    format!("### Repo: {repo_name}")
}

/// One analyzed commit, as written to the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    /// Repository the commit belongs to.
    pub repo_name: String,
    /// Full commit hash, the dedup key.
    pub commit_hash: String,
    /// Timestamp shown on the `**Date:**` line.
    pub date: String,
    /// Commit message.
    pub message: String,
    /// Model output, written verbatim.
    pub analysis: String,
}

impl ReportEntry {
    /// Builds an entry from a commit snapshot and its analysis.
    pub fn new(commit: &CommitInfo, analysis: impl Into<String>) -> Self {
        Self {
            repo_name: commit.repo_name.clone(),
            commit_hash: commit.hash.clone(),
            date: commit.timestamp.clone(),
            message: commit.message.clone(),
            analysis: analysis.into(),
        }
    }

    /// Header line of the repository group this entry belongs to.
    pub fn repo_header(&self) -> String {
        repo_header(&self.repo_name)
    }
}

/// Renders the entry block without its repository header.
impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "**Commit Hash:** {}", self.commit_hash)?;
        writeln!(f, "**Date:** {}", self.date)?;
        writeln!(f, "**Message:** {}", self.message)?;
        writeln!(f, "**Analysis:**")?;
        writeln!(f, "{}", self.analysis)?;
        writeln!(f)?;
        writeln!(f, "---")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_entry() -> ReportEntry {
        ReportEntry {
            repo_name: "myproj".to_string(),
            commit_hash: "abc123".to_string(),
            date: "2024-01-01 09:30:00".to_string(),
            message: "fix bug".to_string(),
            analysis: "Improved reliability.".to_string(),
        }
    }

    #[test]
    fn entry_renders_fixed_block() {
        insta::assert_snapshot!(sample_entry().to_string(), @r"
        **Commit Hash:** abc123
        **Date:** 2024-01-01 09:30:00
        **Message:** fix bug
        **Analysis:**
        Improved reliability.

        ---
        ");
    }

    #[test]
    fn entry_from_commit_info() {
        let commit = CommitInfo {
            message: "feat: add search cache".to_string(),
            hash: "0123456789abcdef0123456789abcdef01234567".to_string(),
            timestamp: "2024-03-05 18:00:00".to_string(),
            repo_name: "shop".to_string(),
        };

        let entry = ReportEntry::new(&commit, "Faster search.");

        assert_eq!(entry.repo_header(), "### Repo: shop");
        assert_eq!(entry.commit_hash, commit.hash);
        assert_eq!(entry.date, "2024-03-05 18:00:00");
        assert_eq!(entry.analysis, "Faster search.");
    }

    #[test]
    fn title_line_names_the_date() {
        assert_eq!(title_line("2024-01-01"), "# Daily Git Report - 2024-01-01\n");
    }
}
