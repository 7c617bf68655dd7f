//! CLI interface for git-daily-report.
//!
//! Without a subcommand the binary runs the report pipeline for the
//! repository in the current directory, which is what the post-commit hook
//! does. Every pipeline outcome is printed to stdout and the process exits 0,
//! so a failing report never blocks a commit.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::{resolve_config_path, Config};
use crate::git::{DateSource, GitInspector};
use crate::pipeline::Pipeline;

pub mod hook;

/// git-daily-report: turns each commit into a daily work report entry.
#[derive(Parser)]
#[command(name = "git-daily-report")]
#[command(about = "Appends an AI-written summary of the latest commit to today's report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the JSON config file (default: .git/hooks/config.json).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Timestamp shown on the entry's Date line (overrides the config file).
    #[arg(long, value_enum)]
    pub date_source: Option<DateSource>,

    /// Optional subcommand; runs the report pipeline when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Installs the post-commit hook in the current repository.
    #[command(name = "install-hook")]
    InstallHook(hook::InstallHookCommand),
}

impl Cli {
    /// Executes the CLI command.
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Some(Commands::InstallHook(cmd)) => cmd.execute(self.config.as_deref()),
            None => {
                run_report(self.config, self.date_source).await;
                Ok(())
            }
        }
    }
}

/// Runs the report pipeline and prints its outcome.
///
/// Nothing here logs above `info`, so a hook run under the default filter
/// leaves stderr empty.
async fn run_report(config_path: Option<PathBuf>, date_source: Option<DateSource>) {
    let config_path = resolve_config_path(config_path.as_deref());
    let config = Config::load_or_default(&config_path);

    let missing = config.missing_fields();
    if !missing.is_empty() {
        info!(
            path = %config_path.display(),
            missing = ?missing,
            "Config has empty required fields"
        );
    }

    let date_source = date_source.unwrap_or(config.date_source);
    let inspector = GitInspector::current(date_source);
    let pipeline = Pipeline::from_config(&config, inspector);

    let outcome = pipeline.run().await;
    println!("{outcome}");
}
