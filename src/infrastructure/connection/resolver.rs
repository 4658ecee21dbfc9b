use std::sync::Arc;

use tracing::debug;

use crate::domain::errors::ConnectionError;
use crate::domain::models::ConnectionProfile;
use crate::domain::ports::ConnectionRegistry;

/// Resolves connection ids into complete profiles.
///
/// Resolution happens on every call and the result is never cached, so a
/// registry change is picked up by the next request.
#[derive(Clone)]
pub struct ConnectionResolver {
    registry: Arc<dyn ConnectionRegistry>,
}

impl ConnectionResolver {
    pub fn new(registry: Arc<dyn ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Resolve `conn_id` into a profile.
    ///
    /// Empty strings count as missing. Host is checked first, then login
    /// (the OAuth token), then password (the organization id).
    pub fn resolve(&self, conn_id: &str) -> Result<ConnectionProfile, ConnectionError> {
        let record = self.registry.get_connection(conn_id)?;

        let base_url = non_empty(record.host)
            .ok_or_else(|| ConnectionError::MissingHost(conn_id.to_string()))?;
        let token = non_empty(record.login).ok_or_else(|| ConnectionError::MissingLogin {
            host: base_url.clone(),
        })?;
        let org_id = non_empty(record.password).ok_or_else(|| ConnectionError::MissingPassword {
            host: base_url.clone(),
        })?;

        debug!(conn_id, base_url = %base_url, "resolved connection");

        Ok(ConnectionProfile {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            org_id,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl std::fmt::Debug for ConnectionResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionResolver").finish_non_exhaustive()
    }
}
