//! Configuration loading.
//!
//! Layers, lowest to highest precedence: built-in defaults, `rankdiff.toml`,
//! `RANKDIFF_*` environment variables, then whatever the caller overrides
//! (the CLI applies its flags last and re-validates).

#![allow(clippy::result_large_err)]

use std::fs;
use std::path::{Path, PathBuf};

use rankdiff_core::errors::{ExError, RankDiffError};
use rankdiff_core::model::DEFAULT_TOP_K;
use rankdiff_core_types::Sensitive;
use serde::Deserialize;

/// Config file picked up from the working directory when none is given
pub const DEFAULT_CONFIG_FILE: &str = "rankdiff.toml";

pub const ENV_ENDPOINT: &str = "RANKDIFF_ENDPOINT";
pub const ENV_COLLECTION: &str = "RANKDIFF_COLLECTION";
pub const ENV_REGFILES_DIR: &str = "RANKDIFF_REGFILES_DIR";
pub const ENV_TIMEOUT_SECS: &str = "RANKDIFF_TIMEOUT_SECS";
pub const ENV_API_KEY: &str = "RANKDIFF_API_KEY";

pub type Result<T> = std::result::Result<T, ExError>;

/// Full tool configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankdiffConfig {
    pub ranking: RankingConfig,
    pub store: StoreConfig,
    pub logging: LoggingConfig,
}

/// `[ranking]`: how to reach the ranking service and what to keep
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankingConfig {
    pub endpoint: String,
    pub collection: String,
    /// Connect + request timeout
    pub timeout_secs: u64,
    pub search_type: String,
    pub favor_recent: bool,
    /// Documents kept per query
    pub top_k: usize,
    /// Sent as a bearer token when set
    pub api_key: Option<Sensitive<String>>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:8080/direct-qa".to_string(),
            collection: "danswer_index".to_string(),
            timeout_secs: 60,
            search_type: "hybrid".to_string(),
            favor_recent: true,
            top_k: DEFAULT_TOP_K,
            api_key: None,
        }
    }
}

/// `[store]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub regfiles_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            regfiles_dir: PathBuf::from(".regfiles"),
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// `[logging]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl RankdiffConfig {
    /// Defaults, then the config file, then the process environment.
    ///
    /// With `path = None`, `rankdiff.toml` in the working directory is used
    /// if it exists. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// `Configuration` if the file cannot be read or parsed, or an
    /// environment value is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML config file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            configuration_error(format!("cannot read config {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            configuration_error(format!("invalid config {}: {}", path.display(), e))
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| configuration_error(e.to_string()))
    }

    /// Overlay `RANKDIFF_*` variables resolved through `lookup`.
    ///
    /// Unset or empty variables are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            self.ranking.endpoint = endpoint;
        }
        if let Some(collection) = get(ENV_COLLECTION) {
            self.ranking.collection = collection;
        }
        if let Some(dir) = get(ENV_REGFILES_DIR) {
            self.store.regfiles_dir = PathBuf::from(dir);
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.ranking.timeout_secs = raw.trim().parse().map_err(|_| {
                configuration_error(format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT_SECS, raw
                ))
            })?;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.ranking.api_key = Some(Sensitive::new(key));
        }
        Ok(())
    }

    /// Reject values no run could succeed with.
    ///
    /// # Errors
    ///
    /// `Configuration` naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        let ranking = &self.ranking;
        if ranking.endpoint.trim().is_empty() {
            return Err(configuration_error("ranking.endpoint must not be empty"));
        }
        if !(ranking.endpoint.starts_with("http://") || ranking.endpoint.starts_with("https://"))
        {
            return Err(configuration_error(format!(
                "ranking.endpoint must be an http(s) URL, got '{}'",
                ranking.endpoint
            )));
        }
        if ranking.collection.trim().is_empty() {
            return Err(configuration_error("ranking.collection must not be empty"));
        }
        if ranking.timeout_secs == 0 {
            return Err(configuration_error("ranking.timeout_secs must be at least 1"));
        }
        if ranking.top_k == 0 {
            return Err(configuration_error("ranking.top_k must be at least 1"));
        }
        if self.store.regfiles_dir.as_os_str().is_empty() {
            return Err(configuration_error("store.regfiles_dir must not be empty"));
        }
        Ok(())
    }
}

fn configuration_error(reason: impl Into<String>) -> ExError {
    ExError::from(RankDiffError::ConfigurationError {
        reason: reason.into(),
    })
    .with_op("load_config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rankdiff_core::errors::ExErrorKind;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = RankdiffConfig::default();
        assert_eq!(config.ranking.endpoint, "http://127.0.0.1:8080/direct-qa");
        assert_eq!(config.ranking.collection, "danswer_index");
        assert_eq!(config.ranking.timeout_secs, 60);
        assert_eq!(config.ranking.top_k, 5);
        assert_eq!(config.store.regfiles_dir, PathBuf::from(".regfiles"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = RankdiffConfig::from_toml_str(
            r#"
            [ranking]
            collection = "support_index"

            [logging]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.ranking.collection, "support_index");
        assert_eq!(config.ranking.endpoint, "http://127.0.0.1:8080/direct-qa");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = RankdiffConfig::from_toml_str("[ranking]\nendpiont = \"x\"\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
    }

    #[test]
    fn test_env_overrides_file() {
        let mut config =
            RankdiffConfig::from_toml_str("[ranking]\ncollection = \"from_file\"\n").unwrap();

        config
            .apply_env(env(&[
                (ENV_COLLECTION, "from_env"),
                (ENV_TIMEOUT_SECS, "15"),
                (ENV_REGFILES_DIR, "/var/regfiles"),
            ]))
            .unwrap();

        assert_eq!(config.ranking.collection, "from_env");
        assert_eq!(config.ranking.timeout_secs, 15);
        assert_eq!(config.store.regfiles_dir, PathBuf::from("/var/regfiles"));
    }

    #[test]
    fn test_non_numeric_timeout_is_configuration_error() {
        let mut config = RankdiffConfig::default();
        let err = config
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::Configuration);
        assert!(err.message().contains("soon"));
    }

    #[test]
    fn test_api_key_is_redacted() {
        let mut config = RankdiffConfig::default();
        config
            .apply_env(env(&[(ENV_API_KEY, "secret-token")]))
            .unwrap();
        assert!(!format!("{:?}", config).contains("secret-token"));
        assert_eq!(
            config.ranking.api_key.as_ref().map(|k| k.expose().as_str()),
            Some("secret-token")
        );
    }

    #[test]
    fn test_validate_rejects_zero_top_k_and_empty_endpoint() {
        let mut config = RankdiffConfig::default();
        config.ranking.top_k = 0;
        assert_eq!(
            config.validate().unwrap_err().kind(),
            ExErrorKind::Configuration
        );

        let mut config = RankdiffConfig::default();
        config.ranking.endpoint = "  ".to_string();
        assert!(config.validate().is_err());
    }
}
