//! Application-level configuration loading: catalog location, activity log
//! size, and recommender selection.

use std::{env, fs, io::ErrorKind, path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "NEXTQUEST_BACK_CONFIG_PATH";
const DEFAULT_CATALOG_PATH: &str = "config/catalog.json";
const DEFAULT_ACTIVITY_CAPACITY: usize = 200;
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Which recommender backs the discover endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommenderProvider {
    /// Remote generative text API.
    Gemini,
    /// Random pick from the candidate pool, no network involved.
    Local,
}

/// Settings of the recommender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommenderSettings {
    pub provider: RecommenderProvider,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        Self {
            provider: RecommenderProvider::Gemini,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    /// Fixture file holding the catalog and seed data.
    pub catalog_path: PathBuf,
    /// Maximum number of activities kept for the feed.
    pub activity_capacity: usize,
    pub recommender: RecommenderSettings,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to built-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        provider = ?app_config.recommender.provider,
                        "loaded configuration"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            recommender: RecommenderSettings::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
/// Every field is optional so partial files only override what they name.
struct RawConfig {
    catalog_path: Option<PathBuf>,
    activity_capacity: Option<usize>,
    #[serde(default)]
    recommender: RawRecommender,
}

#[derive(Debug, Default, Deserialize)]
struct RawRecommender {
    provider: Option<RecommenderProvider>,
    model: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        let defaults = AppConfig::default();
        let recommender = RecommenderSettings {
            provider: value
                .recommender
                .provider
                .unwrap_or(defaults.recommender.provider),
            model: value
                .recommender
                .model
                .unwrap_or(defaults.recommender.model),
            base_url: value
                .recommender
                .base_url
                .unwrap_or(defaults.recommender.base_url),
            timeout: value
                .recommender
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.recommender.timeout),
        };

        Self {
            catalog_path: value.catalog_path.unwrap_or(defaults.catalog_path),
            activity_capacity: value
                .activity_capacity
                .unwrap_or(defaults.activity_capacity),
            recommender,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let raw: RawConfig =
            serde_json::from_str(r#"{ "recommender": { "provider": "local" } }"#).unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.recommender.provider, RecommenderProvider::Local);
        assert_eq!(config.recommender.model, DEFAULT_MODEL);
        assert_eq!(config.activity_capacity, DEFAULT_ACTIVITY_CAPACITY);
        assert_eq!(config.catalog_path, PathBuf::from(DEFAULT_CATALOG_PATH));
    }

    #[test]
    fn full_file_overrides_everything() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "catalog_path": "/srv/catalog.json",
                "activity_capacity": 10,
                "recommender": {
                    "provider": "gemini",
                    "model": "gemini-pro",
                    "base_url": "http://localhost:9000",
                    "timeout_secs": 5
                }
            }"#,
        )
        .unwrap();
        let config = AppConfig::from(raw);

        assert_eq!(config.catalog_path, PathBuf::from("/srv/catalog.json"));
        assert_eq!(config.activity_capacity, 10);
        assert_eq!(config.recommender.model, "gemini-pro");
        assert_eq!(config.recommender.base_url, "http://localhost:9000");
        assert_eq!(config.recommender.timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        assert!(serde_json::from_str::<RawConfig>(r#"{ "recommender": { "provider": "oracle" } }"#).is_err());
    }
}
