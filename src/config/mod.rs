//! Report configuration loaded from the hook's JSON config file.
//!
//! The configuration is read once at startup and then passed by reference to
//! the components that need it. Nothing in the crate holds it globally.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::git::DateSource;

/// Config path used when the hook runs without `--config`, relative to the
/// repository root.
pub const DEFAULT_CONFIG_PATH: &str = ".git/hooks/config.json";

/// Directory under `$HOME` holding the fallback config file.
const HOME_CONFIG_DIR: &str = ".git-daily-report";

/// Settings for the language-model endpoint and the report directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Base URL of the OpenAI-compatible API, e.g. `https://api.openai.com/v1`.
    #[serde(default, rename = "openai_base_url")]
    pub base_url: String,

    /// Static bearer token sent with every request.
    #[serde(default, rename = "openai_api_key")]
    pub api_key: String,

    /// Model identifier placed in the request body.
    #[serde(default, rename = "moderation_model")]
    pub model: String,

    /// Directory that holds the `git_report_<date>.md` files.
    #[serde(default)]
    pub daily_path: String,

    /// Which timestamp goes on the `**Date:**` line of an entry.
    #[serde(default)]
    pub date_source: DateSource,
}

impl Config {
    /// Loads the configuration from `path`, failing if the file is missing or
    /// does not parse.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config = serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), model = %config.model, "Loaded report configuration");
        Ok(config)
    }

    /// Loads the configuration, falling back to an empty config on any error.
    ///
    /// A zero-valued config still flows through the pipeline; the request to
    /// an empty base URL then fails at the analysis step.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                println!("Failed to load config file: {e:#}");
                info!(path = %path.display(), error = %e, "Using empty configuration");
                Self::default()
            }
        }
    }

    /// Returns the names of required fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = self.missing_endpoint_fields();
        if self.daily_path.trim().is_empty() {
            missing.push("daily_path");
        }
        missing
    }

    /// Returns the names of empty fields needed to reach the model endpoint.
    ///
    /// An empty `daily_path` is not among them: reports then go to the
    /// current directory.
    pub fn missing_endpoint_fields(&self) -> Vec<&'static str> {
        [
            ("openai_base_url", &self.base_url),
            ("openai_api_key", &self.api_key),
            ("moderation_model", &self.model),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Directory holding the daily report files.
    pub fn report_dir(&self) -> PathBuf {
        PathBuf::from(&self.daily_path)
    }
}

/// Resolves the config file to load when none was given on the command line.
///
/// Prefers the repository-local hook config and falls back to
/// `$HOME/.git-daily-report/config.json` when that one does not exist.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    choose_config_path(explicit, Path::new(DEFAULT_CONFIG_PATH), home_config_path())
}

fn choose_config_path(explicit: Option<&Path>, local: &Path, home: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }

    if local.exists() {
        return local.to_path_buf();
    }

    match home {
        Some(home) if home.exists() => {
            debug!(path = %home.display(), "Using config from home directory");
            home
        }
        _ => local.to_path_buf(),
    }
}

/// Returns `$HOME/.git-daily-report/config.json`, if a home directory is known.
pub fn home_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(HOME_CONFIG_DIR).join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const FULL_CONFIG: &str = r#"{
        "openai_base_url": "https://llm.example.com/v1",
        "openai_api_key": "sk-test",
        "moderation_model": "gpt-4o-mini",
        "daily_path": "/tmp/reports"
    }"#;

    #[test]
    fn load_from_path_reads_all_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, FULL_CONFIG).unwrap();

        let config = Config::load_from_path(&path).unwrap();

        assert_eq!(config.base_url, "https://llm.example.com/v1");
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.daily_path, "/tmp/reports");
        assert_eq!(config.date_source, DateSource::Report);
        assert!(config.missing_fields().is_empty());
    }

    #[test]
    fn load_from_path_reads_date_source() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"openai_base_url": "u", "openai_api_key": "k", "moderation_model": "m",
                "daily_path": "d", "date_source": "commit"}"#,
        )
        .unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert_eq!(config.date_source, DateSource::Commit);
    }

    #[test]
    fn load_from_path_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from_path(temp_dir.path().join("absent.json"));
        assert!(result.is_err());
    }

    #[test]
    fn load_or_default_malformed_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        let config = Config::load_or_default(&path);
        assert_eq!(config, Config::default());
        assert_eq!(config.missing_fields().len(), 4);
    }

    #[test]
    fn missing_fields_lists_blank_values() {
        let config = Config {
            base_url: "https://llm.example.com".to_string(),
            api_key: "  ".to_string(),
            model: "m".to_string(),
            daily_path: String::new(),
            date_source: DateSource::Report,
        };
        assert_eq!(config.missing_fields(), vec!["openai_api_key", "daily_path"]);
    }

    #[test]
    fn missing_endpoint_fields_ignore_daily_path() {
        let config = Config {
            base_url: "https://llm.example.com".to_string(),
            api_key: "sk".to_string(),
            model: String::new(),
            daily_path: String::new(),
            date_source: DateSource::Report,
        };
        assert_eq!(config.missing_endpoint_fields(), vec!["moderation_model"]);
        assert_eq!(
            config.missing_fields(),
            vec!["moderation_model", "daily_path"]
        );
    }

    #[test]
    fn resolve_config_path_prefers_explicit() {
        let explicit = Path::new("/etc/report.json");
        assert_eq!(resolve_config_path(Some(explicit)), explicit);
    }

    #[test]
    fn choose_config_path_prefers_existing_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("local.json");
        let home = temp_dir.path().join("home.json");
        fs::write(&local, "{}").unwrap();
        fs::write(&home, "{}").unwrap();

        assert_eq!(choose_config_path(None, &local, Some(home)), local);
    }

    #[test]
    fn choose_config_path_falls_back_to_home_file() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("missing.json");
        let home = temp_dir.path().join(HOME_CONFIG_DIR).join("config.json");
        fs::create_dir_all(home.parent().unwrap()).unwrap();
        fs::write(&home, "{}").unwrap();

        assert_eq!(choose_config_path(None, &local, Some(home.clone())), home);
    }

    #[test]
    fn choose_config_path_keeps_local_when_neither_exists() {
        let temp_dir = TempDir::new().unwrap();
        let local = temp_dir.path().join("missing.json");
        let home = temp_dir.path().join("also-missing.json");

        assert_eq!(choose_config_path(None, &local, Some(home)), local);
        assert_eq!(choose_config_path(None, &local, None), local);
    }
}
