//! Error taxonomy for tracker operations.

use reqwest::StatusCode;
use thiserror::Error;

use super::validation::ValidationErrors;

/// Connection profile could not be resolved from the registry.
///
/// These are configuration errors and are never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("Connection not found: {0}")]
    UnknownConnection(String),

    #[error("Host not provided in configuration for connection {0}")]
    MissingHost(String),

    #[error("Connection to {host} requires login")]
    MissingLogin { host: String },

    #[error("Connection to {host} requires password")]
    MissingPassword { host: String },
}

/// Failures talking to the tracker API over HTTP.
#[derive(Error, Debug)]
pub enum TrackerApiError {
    /// Connecting to the host timed out
    #[error("Connect timeout: {0}")]
    ConnectTimeout(#[source] reqwest::Error),

    /// Server answered with a 4xx or 5xx status
    #[error("HTTP error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    /// Any other transport failure (refused connection, read timeout, ...)
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// Response body does not match the expected schema
    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid header value for {name}")]
    InvalidHeader { name: &'static str },
}

impl TrackerApiError {
    /// Classify a transport error, separating connect timeouts from the rest.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() && err.is_timeout() {
            Self::ConnectTimeout(err)
        } else {
            Self::Transport(err)
        }
    }

    /// Returns true for the conditions the retry policy re-attempts:
    /// connect timeouts and HTTP error statuses.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectTimeout(_) | Self::Status { .. })
    }

    /// HTTP status of the failed response, if there was one.
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Top-level error surfaced by every tracker operation.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Api(#[from] TrackerApiError),

    #[error("Operation not implemented: {0}")]
    NotImplemented(&'static str),
}

impl TrackerError {
    /// Default retry predicate: only transient API failures are retried.
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Api(err) => err.is_retryable(),
            _ => false,
        }
    }
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::FieldViolation;

    fn decode_error() -> TrackerApiError {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        TrackerApiError::Decode {
            source,
            body: "{".to_string(),
        }
    }

    #[test]
    fn test_status_errors_are_retryable() {
        let not_found = TrackerApiError::Status {
            status: StatusCode::NOT_FOUND,
            body: "no such issue".to_string(),
        };
        let server = TrackerApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };

        assert!(not_found.is_retryable());
        assert!(server.is_retryable());
        assert_eq!(server.status(), Some(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn test_non_transient_errors_are_not_retryable() {
        assert!(!decode_error().is_retryable());
        assert!(!TrackerApiError::InvalidHeader { name: "X-Org-Id" }.is_retryable());
        assert!(!TrackerApiError::InvalidUrl {
            url: "::".to_string(),
            reason: "relative URL without a base".to_string(),
        }
        .is_retryable());
    }

    #[test]
    fn test_tracker_error_predicate() {
        let api: TrackerError = TrackerApiError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: String::new(),
        }
        .into();
        assert!(api.is_retryable());

        let conn: TrackerError = ConnectionError::MissingHost("yatracker_default".to_string()).into();
        assert!(!conn.is_retryable());

        let validation: TrackerError = ValidationErrors::check(vec![FieldViolation::new(
            "summary",
            "empty",
        )])
        .unwrap_err()
        .into();
        assert!(!validation.is_retryable());

        assert!(!TrackerError::NotImplemented("run").is_retryable());
    }

    #[test]
    fn test_connection_error_messages_name_the_field() {
        let host = ConnectionError::MissingHost("yatracker_default".to_string()).to_string();
        let login = ConnectionError::MissingLogin {
            host: "https://api.tracker.yandex.net".to_string(),
        }
        .to_string();
        let password = ConnectionError::MissingPassword {
            host: "https://api.tracker.yandex.net".to_string(),
        }
        .to_string();

        assert!(host.contains("Host"));
        assert!(login.contains("login"));
        assert!(password.contains("password"));
        assert_ne!(login, password);
    }

    #[test]
    fn test_error_message_preserved_through_top_level() {
        let inner = TrackerApiError::Status {
            status: StatusCode::CONFLICT,
            body: "version mismatch".to_string(),
        };
        let expected = inner.to_string();
        let outer: TrackerError = inner.into();
        assert_eq!(outer.to_string(), expected);
    }
}
