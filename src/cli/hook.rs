//! Post-commit hook installation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::config::{Config, DEFAULT_CONFIG_PATH};

/// Hooks directory relative to the repository root.
const HOOKS_DIR: &str = ".git/hooks";

/// Install-hook command options.
#[derive(Parser)]
pub struct InstallHookCommand {
    /// Overwrites an existing post-commit hook.
    #[arg(long)]
    pub force: bool,
}

impl InstallHookCommand {
    /// Executes the install-hook command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<()> {
        let hooks_dir = Path::new(HOOKS_DIR);
        if !hooks_dir.is_dir() {
            bail!("{HOOKS_DIR} not found. Run install-hook from the repository root");
        }

        let program = env::current_exe()
            .map(|exe| exe.to_string_lossy().into_owned())
            .unwrap_or_else(|_| env!("CARGO_PKG_NAME").to_string());

        let hook_path = install_hook(hooks_dir, &program, self.force)?;
        println!("✅ Installed {}", hook_path.display());

        let config_path = config_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));
        if write_config_template(config_path)? {
            println!(
                "✅ Wrote config template {}; fill in the endpoint and report directory",
                config_path.display()
            );
        }

        Ok(())
    }
}

/// Returns the post-commit script that runs `program`.
fn hook_script(program: &str) -> String {
    format!(
        "#!/bin/sh\n# Installed by git-daily-report.\n{}\nexit 0\n",
        shell_quote(program)
    )
}

/// Quotes `word` for POSIX sh: single quotes, with each `'` written as `'\''`.
fn shell_quote(word: &str) -> String {
    format!("'{}'", word.replace('\'', r"'\''"))
}

/// Writes an executable `post-commit` hook into `hooks_dir`.
pub fn install_hook(hooks_dir: &Path, program: &str, force: bool) -> Result<PathBuf> {
    let hook_path = hooks_dir.join("post-commit");
    if hook_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite it",
            hook_path.display()
        );
    }

    fs::write(&hook_path, hook_script(program))
        .with_context(|| format!("Failed to write {}", hook_path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))
            .with_context(|| format!("Failed to make {} executable", hook_path.display()))?;
    }

    Ok(hook_path)
}

/// Writes an empty config file at `path` unless one exists.
///
/// Returns whether a file was written.
pub fn write_config_template(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    let template = serde_json::to_string_pretty(&Config::default())
        .context("Failed to serialize config template")?;
    fs::write(path, template + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn install_hook_writes_script() {
        let temp_dir = TempDir::new().unwrap();

        let path = install_hook(temp_dir.path(), "/usr/local/bin/git-daily-report", false)
            .unwrap();

        let script = fs::read_to_string(&path).unwrap();
        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains("\n'/usr/local/bin/git-daily-report'\n"));
        assert!(script.ends_with("exit 0\n"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o111, 0o111);
        }
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("/opt/bin/tool"), "'/opt/bin/tool'");
        assert_eq!(shell_quote("/opt/it's/tool"), r"'/opt/it'\''s/tool'");
    }

    #[cfg(unix)]
    #[test]
    fn hook_script_passes_special_characters_literally() {
        let program = r#"/tmp/we"ird $HOME `id` it's/git-daily-report"#;
        let script = hook_script(program);
        let command_line = script.lines().nth(2).unwrap();

        let output = std::process::Command::new("sh")
            .arg("-c")
            .arg(format!("printf '%s' {command_line}"))
            .output()
            .unwrap();

        assert!(output.status.success());
        assert_eq!(String::from_utf8(output.stdout).unwrap(), program);
    }

    #[test]
    fn install_hook_refuses_to_overwrite_without_force() {
        let temp_dir = TempDir::new().unwrap();
        let existing = temp_dir.path().join("post-commit");
        fs::write(&existing, "#!/bin/sh\nmake lint\n").unwrap();

        assert!(install_hook(temp_dir.path(), "git-daily-report", false).is_err());
        assert_eq!(
            fs::read_to_string(&existing).unwrap(),
            "#!/bin/sh\nmake lint\n"
        );

        install_hook(temp_dir.path(), "git-daily-report", true).unwrap();
        assert!(fs::read_to_string(&existing)
            .unwrap()
            .contains("git-daily-report"));
    }

    #[test]
    fn config_template_round_trips_and_is_not_overwritten() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");

        assert!(write_config_template(&path).unwrap());
        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config, Config::default());

        fs::write(&path, "{}").unwrap();
        assert!(!write_config_template(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
