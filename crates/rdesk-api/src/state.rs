//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Holds the service configuration and the
//! review request repository behind its trait object.

use std::path::PathBuf;
use std::sync::Arc;

use crate::repository::{InMemoryRepository, LoadError, ReviewRepository};

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Service configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// JSON fixture to seed the repository from. `None` uses the built-in
    /// sample data.
    pub sample_data: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Read `PORT`, `RDESK_SAMPLE_DATA` and `LOG_FORMAT`. Unset or
    /// unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(8080);
        let sample_data = lookup("RDESK_SAMPLE_DATA")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);
        let log_format = LogFormat::from_env_value(lookup("LOG_FORMAT").as_deref());
        Self {
            port,
            sample_data,
            log_format,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            sample_data: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub repository: Arc<dyn ReviewRepository>,
}

impl AppState {
    /// State with default configuration over the built-in sample data.
    pub fn new() -> Self {
        Self::with_repository(AppConfig::default(), InMemoryRepository::sample())
    }

    /// Build state from configuration, loading the fixture if one is set.
    ///
    /// Fails only when the fixture cannot be read.
    pub fn from_config(config: AppConfig) -> Result<Self, LoadError> {
        let repository = match &config.sample_data {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading review requests from fixture");
                InMemoryRepository::from_path(path)?
            }
            None => InMemoryRepository::sample(),
        };
        Ok(Self::with_repository(config, repository))
    }

    /// State over an explicit repository.
    pub fn with_repository(config: AppConfig, repository: impl ReviewRepository + 'static) -> Self {
        Self {
            config,
            repository: Arc::new(repository),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), AppConfig::default());
    }

    #[test]
    fn reads_port_fixture_and_format() {
        let cfg = config(&[
            ("PORT", "9090"),
            ("RDESK_SAMPLE_DATA", "/tmp/requests.json"),
            ("LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.sample_data, Some(PathBuf::from("/tmp/requests.json")));
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_port_falls_back() {
        assert_eq!(config(&[("PORT", "eighty")]).port, 8080);
    }

    #[test]
    fn blank_fixture_path_means_sample() {
        assert_eq!(config(&[("RDESK_SAMPLE_DATA", "  ")]).sample_data, None);
    }

    #[test]
    fn unknown_log_format_is_text() {
        assert_eq!(config(&[("LOG_FORMAT", "yaml")]).log_format, LogFormat::Text);
    }

    #[test]
    fn from_config_without_fixture_uses_sample() {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        assert_eq!(state.repository.count().unwrap(), 5);
    }

    #[test]
    fn from_config_with_missing_fixture_fails() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            sample_data: Some(dir.path().join("nope.json")),
            ..AppConfig::default()
        };
        assert!(AppState::from_config(cfg).is_err());
    }
}
