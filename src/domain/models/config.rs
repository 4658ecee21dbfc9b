use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::connection::ConnectionRecord;

/// Main configuration structure for the tracker client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Connection used when none is named explicitly
    #[serde(default = "default_connection")]
    pub default_connection: String,

    /// API version path segment
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Retry policy configuration
    #[serde(default)]
    pub retry: RetryConfig,

    /// HTTP transport configuration
    #[serde(default)]
    pub transport: TransportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Named connection profiles
    #[serde(default)]
    pub connections: BTreeMap<String, ConnectionRecord>,
}

fn default_connection() -> String {
    "yatracker_default".to_string()
}

fn default_api_version() -> String {
    "v2".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_connection: default_connection(),
            api_version: default_api_version(),
            retry: RetryConfig::default(),
            transport: TransportConfig::default(),
            logging: LoggingConfig::default(),
            connections: BTreeMap::new(),
        }
    }
}

/// Retry policy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RetryConfig {
    /// Total attempts per call, including the first
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Delay before the first retry in milliseconds (0 retries immediately)
    #[serde(default)]
    pub initial_backoff_ms: u64,

    /// Upper bound for the doubled delay in milliseconds
    #[serde(default)]
    pub max_backoff_ms: u64,
}

const fn default_max_attempts() -> u32 {
    3
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TransportConfig {
    /// TCP connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

const fn default_timeout_secs() -> u64 {
    60
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
        }
    }
}
