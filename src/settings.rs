//! Layered configuration.
//!
//! Settings are resolved in this order, later sources winning:
//!
//! 1. Built-in defaults
//! 2. An optional TOML file (`caninewatch.toml` unless `--config` says otherwise)
//! 3. Environment variables prefixed with `CANINEWATCH_`, e.g.
//!    `CANINEWATCH_BASE_URL` or `CANINEWATCH_ALERTS_LIMIT`
//!
//! Command-line flags are applied on top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use caninewatch_client::{FeedError, HttpFeed};

use crate::data::duration::parse_duration;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "caninewatch.toml";

const ENV_PREFIX: &str = "CANINEWATCH";

/// Resolved client settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
    pub write_timeout_secs: u64,
    /// Auto-refresh interval of the home dashboard, e.g. "10s".
    pub home_refresh: String,
    pub alerts_limit: u32,
    pub heat_history_limit: u32,
    /// The dog shown until a reading names one.
    pub dog_name: String,
    /// Where the TUI writes its log.
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: caninewatch_client::http::DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 30,
            read_timeout_secs: 30,
            write_timeout_secs: 30,
            home_refresh: "10s".to_string(),
            alerts_limit: 10,
            heat_history_limit: 20,
            dog_name: "Max".to_string(),
            log_file: PathBuf::from("caninewatch.log"),
        }
    }
}

impl Settings {
    /// Load settings from defaults, `path` (if it exists) and the environment.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with(path: &Path, environment: Environment) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment.prefix_separator("_").separator("__"))
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// The home dashboard's refresh interval.
    pub fn home_refresh_interval(&self) -> Result<Duration> {
        parse_duration(&self.home_refresh)
            .with_context(|| format!("Invalid home_refresh {:?}", self.home_refresh))
    }

    /// Build the HTTP feed these settings describe.
    pub fn http_feed(&self) -> Result<HttpFeed, FeedError> {
        HttpFeed::builder()
            .base_url(self.base_url.clone())
            .connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .read_timeout(Duration::from_secs(self.read_timeout_secs))
            .write_timeout(Duration::from_secs(self.write_timeout_secs))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_with(&dir.path().join("missing.toml"), no_env()).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.home_refresh_interval().unwrap(), Duration::from_secs(10));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caninewatch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "base_url = \"http://10.0.0.5:5000/api/\"").unwrap();
        writeln!(file, "alerts_limit = 25").unwrap();
        writeln!(file, "home_refresh = \"500ms\"").unwrap();

        let settings = Settings::load_with(&path, no_env()).unwrap();
        assert_eq!(settings.base_url, "http://10.0.0.5:5000/api/");
        assert_eq!(settings.alerts_limit, 25);
        assert_eq!(settings.heat_history_limit, 20);
        assert_eq!(
            settings.home_refresh_interval().unwrap(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("caninewatch.toml");
        std::fs::write(&path, "dog_name = \"Bella\"\n").unwrap();

        let env = HashMap::from([
            ("CANINEWATCH_DOG_NAME".to_string(), "Rex".to_string()),
            ("CANINEWATCH_READ_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        let settings =
            Settings::load_with(&path, Environment::with_prefix(ENV_PREFIX).source(Some(env)))
                .unwrap();
        assert_eq!(settings.dog_name, "Rex");
        assert_eq!(settings.read_timeout_secs, 5);
    }

    #[test]
    fn test_invalid_refresh_is_reported() {
        let settings = Settings {
            home_refresh: "soon".to_string(),
            ..Settings::default()
        };
        assert!(settings.home_refresh_interval().is_err());
    }

    #[test]
    fn test_http_feed_uses_base_url() {
        let settings = Settings {
            base_url: "http://localhost:8080/api".to_string(),
            ..Settings::default()
        };
        let feed = settings.http_feed().unwrap();
        assert_eq!(feed.base_url().as_str(), "http://localhost:8080/api/");
    }
}
