//! Connection records and resolved profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::wire;

/// Raw connection entry as stored in a registry; any field may be missing.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    /// Base URL of the tracker API, e.g. `https://api.tracker.yandex.net`
    #[serde(default, deserialize_with = "wire::lenient_string_opt::deserialize")]
    pub host: Option<String>,
    /// OAuth token
    #[serde(default, deserialize_with = "wire::lenient_string_opt::deserialize")]
    pub login: Option<String>,
    /// Organization id
    #[serde(default, deserialize_with = "wire::lenient_string_opt::deserialize")]
    pub password: Option<String>,
}

impl ConnectionRecord {
    pub fn new(
        host: impl Into<String>,
        login: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: Some(host.into()),
            login: Some(login.into()),
            password: Some(password.into()),
        }
    }
}

impl fmt::Debug for ConnectionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRecord")
            .field("host", &self.host)
            .field("login", &self.login.as_ref().map(|_| "[REDACTED]"))
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Fully resolved credentials for one call.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionProfile {
    pub base_url: String,
    pub token: String,
    pub org_id: String,
}

impl fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionProfile")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .field("org_id", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_accepts_numeric_fields() {
        let record: ConnectionRecord =
            serde_json::from_str(r#"{"host": "https://h", "login": "y0_t", "password": 7654321}"#)
                .unwrap();
        assert_eq!(record.password.as_deref(), Some("7654321"));
        assert_eq!(record.login.as_deref(), Some("y0_t"));

        let record: ConnectionRecord = serde_json::from_str(r#"{"password": null}"#).unwrap();
        assert_eq!(record, ConnectionRecord::default());
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let profile = ConnectionProfile {
            base_url: "https://api.tracker.yandex.net".to_string(),
            token: "y0_AgAAAAB-secret".to_string(),
            org_id: "7654321".to_string(),
        };
        let rendered = format!("{profile:?}");
        assert!(rendered.contains("https://api.tracker.yandex.net"));
        assert!(!rendered.contains("y0_AgAAAAB-secret"));
        assert!(!rendered.contains("7654321"));

        let record = ConnectionRecord::new("https://h", "y0_token", "42");
        let rendered = format!("{record:?}");
        assert!(!rendered.contains("y0_token"));
        assert!(rendered.contains("https://h"));
    }
}
