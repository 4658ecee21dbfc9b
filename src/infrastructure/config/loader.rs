use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use thiserror::Error;

use crate::domain::models::config::Config;

/// Configuration error types
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid max_attempts: {0}. Must be at least 1")]
    InvalidMaxAttempts(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Invalid {0}: must be at least 1 second")]
    InvalidTimeout(&'static str),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("api_version cannot be empty")]
    EmptyApiVersion,

    #[error("default_connection cannot be empty")]
    EmptyDefaultConnection,
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .yatracker/config.yaml (project config)
    /// 3. .yatracker/local.yaml (local overrides, usually holding credentials)
    /// 4. Environment variables (`YATRACKER_*` prefix, `__` separates nesting)
    pub fn load() -> Result<Config> {
        let config: Config = Self::figment()
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    ///
    /// Environment variables still override values from the file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .merge(Env::prefixed("YATRACKER_").split("__"))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    fn figment() -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".yatracker/config.yaml"))
            .merge(Yaml::file(".yatracker/local.yaml"))
            .merge(Env::prefixed("YATRACKER_").split("__"))
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.default_connection.trim().is_empty() {
            return Err(ConfigError::EmptyDefaultConnection);
        }

        if config.api_version.trim().is_empty() {
            return Err(ConfigError::EmptyApiVersion);
        }

        if config.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidMaxAttempts(config.retry.max_attempts));
        }

        // A zero ceiling means "no backoff at all"
        if config.retry.max_backoff_ms != 0
            && config.retry.initial_backoff_ms > config.retry.max_backoff_ms
        {
            return Err(ConfigError::InvalidBackoff(
                config.retry.initial_backoff_ms,
                config.retry.max_backoff_ms,
            ));
        }

        if config.transport.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("connect_timeout_secs"));
        }

        if config.transport.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout("timeout_secs"));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_connection, "yatracker_default");
        assert_eq!(config.api_version, "v2");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.initial_backoff_ms, 0);
        assert_eq!(config.logging.level, "warn");
        assert!(config.connections.is_empty());
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
default_connection: prod
retry:
  max_attempts: 5
  initial_backoff_ms: 100
  max_backoff_ms: 2000
transport:
  timeout_secs: 30
logging:
  level: debug
  format: json
connections:
  prod:
    host: https://api.tracker.yandex.net
    login: oauth-token
    password: '12345'
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert_eq!(config.default_connection, "prod");
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.max_backoff_ms, 2000);
        assert_eq!(config.transport.timeout_secs, 30);
        assert_eq!(config.transport.connect_timeout_secs, 10);
        assert_eq!(config.logging.format, "json");

        let prod = &config.connections["prod"];
        assert_eq!(prod.host.as_deref(), Some("https://api.tracker.yandex.net"));
        assert_eq!(prod.password.as_deref(), Some("12345"));

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_zero_max_attempts() {
        let mut config = Config::default();
        config.retry.max_attempts = 0;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxAttempts(0))
        );
    }

    #[test]
    fn test_validate_invalid_backoff() {
        let mut config = Config::default();
        config.retry.initial_backoff_ms = 3000;
        config.retry.max_backoff_ms = 1000;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(3000, 1000))
        );
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = Config::default();
        config.transport.connect_timeout_secs = 0;

        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout("connect_timeout_secs"))
        );
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config).unwrap_err() {
            ConfigError::InvalidLogLevel(level) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogFormat(_))
        ));
    }

    #[test]
    fn test_validate_empty_names() {
        let mut config = Config::default();
        config.api_version = String::new();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyApiVersion)
        );

        let mut config = Config::default();
        config.default_connection = " ".to_string();
        assert_eq!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyDefaultConnection)
        );
    }

    #[test]
    fn test_hierarchical_merging() {
        let mut base_file = NamedTempFile::new().unwrap();
        writeln!(
            base_file,
            "api_version: v2\nlogging:\n  level: info\n  format: json"
        )
        .unwrap();
        base_file.flush().unwrap();

        let mut override_file = NamedTempFile::new().unwrap();
        writeln!(override_file, "api_version: v3\nlogging:\n  level: debug").unwrap();
        override_file.flush().unwrap();

        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(base_file.path()))
            .merge(Yaml::file(override_file.path()))
            .extract()
            .unwrap();

        assert_eq!(config.api_version, "v3", "Override should win");
        assert_eq!(
            config.logging.level, "debug",
            "Override should win for nested fields"
        );
        assert_eq!(
            config.logging.format, "json",
            "Base value should persist when not overridden"
        );
    }

    #[test]
    fn test_load_from_file_with_env_override() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "connections:\n  prod:\n    host: https://api.tracker.yandex.net\n    login: from-file"
        )
        .unwrap();
        file.flush().unwrap();

        temp_env::with_vars(
            [
                ("YATRACKER_RETRY__MAX_ATTEMPTS", Some("5")),
                ("YATRACKER_CONNECTIONS__PROD__PASSWORD", Some("org-from-env")),
            ],
            || {
                let config = ConfigLoader::load_from_file(file.path()).unwrap();

                assert_eq!(config.retry.max_attempts, 5);
                let prod = &config.connections["prod"];
                assert_eq!(prod.login.as_deref(), Some("from-file"));
                assert_eq!(prod.password.as_deref(), Some("org-from-env"));
            },
        );
    }

    #[test]
    fn test_load_from_file_accepts_numeric_org_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "connections:\n  staging:\n    host: https://api.tracker.yandex.net\n    login: y0_token\n    password: 7654321"
        )
        .unwrap();
        file.flush().unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();

        let staging = &config.connections["staging"];
        assert_eq!(staging.password.as_deref(), Some("7654321"));
        assert_eq!(staging.login.as_deref(), Some("y0_token"));
    }

    #[test]
    fn test_env_accepts_numeric_org_id() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "connections:\n  prod:\n    host: https://api.tracker.yandex.net\n    login: from-file"
        )
        .unwrap();
        file.flush().unwrap();

        temp_env::with_var("YATRACKER_CONNECTIONS__PROD__PASSWORD", Some("7654321"), || {
            let config = ConfigLoader::load_from_file(file.path()).unwrap();

            let prod = &config.connections["prod"];
            assert_eq!(prod.password.as_deref(), Some("7654321"));
            assert_eq!(prod.login.as_deref(), Some("from-file"));
        });
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "retry:\n  max_attempts: 0").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }
}
