use std::collections::BTreeMap;

use crate::domain::errors::ConnectionError;
use crate::domain::models::{Config, ConnectionRecord};
use crate::domain::ports::ConnectionRegistry;

/// In-memory registry, usually built from the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticConnectionRegistry {
    connections: BTreeMap<String, ConnectionRecord>,
}

impl StaticConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a connection record.
    #[must_use]
    pub fn with_connection(mut self, conn_id: impl Into<String>, record: ConnectionRecord) -> Self {
        self.connections.insert(conn_id.into(), record);
        self
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            connections: config.connections.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl ConnectionRegistry for StaticConnectionRegistry {
    fn get_connection(&self, conn_id: &str) -> Result<ConnectionRecord, ConnectionError> {
        self.connections
            .get(conn_id)
            .cloned()
            .ok_or_else(|| ConnectionError::UnknownConnection(conn_id.to_string()))
    }
}
