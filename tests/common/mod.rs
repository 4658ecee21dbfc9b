//! Common test utilities for integration tests
//!
//! Provides tracker payload fixtures and a client pointed at a mock server.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use yatracker::domain::models::ConnectionRecord;
use yatracker::infrastructure::connection::StaticConnectionRegistry;
use yatracker::infrastructure::tracker::{TrackerClient, TrackerClientConfig};

pub const CONN_ID: &str = "yatracker_default";
pub const TOKEN: &str = "y0_test-token";
pub const ORG_ID: &str = "7654321";

/// Client for `base_url` with default settings (three immediate attempts)
pub fn client_for(base_url: &str) -> TrackerClient {
    client_with_record(ConnectionRecord::new(base_url, TOKEN, ORG_ID))
}

pub fn client_with_record(record: ConnectionRecord) -> TrackerClient {
    client_with_config(record, TrackerClientConfig::default())
}

pub fn client_with_config(record: ConnectionRecord, config: TrackerClientConfig) -> TrackerClient {
    let registry = StaticConnectionRegistry::new().with_connection(CONN_ID, record);
    TrackerClient::new(Arc::new(registry), config)
}

pub fn entity_json(key: &str, display: &str) -> Value {
    json!({
        "self": format!("https://api.tracker.yandex.net/v2/entities/{key}"),
        "id": "1",
        "key": key,
        "display": display,
    })
}

pub fn user_json(login: &str) -> Value {
    json!({
        "self": format!("https://api.tracker.yandex.net/v2/users/{login}"),
        "id": "1120000000016876",
        "display": login,
    })
}

/// Issue as the tracker returns it from create, edit and search
pub fn issue_json(key: &str) -> Value {
    json!({
        "self": format!("https://api.tracker.yandex.net/v2/issues/{key}"),
        "id": "593cd211ef7e8a332414f2a7",
        "key": key,
        "version": 7,
        "lastCommentUpdatedAt": "2024-03-01T09:00:00.000+0000",
        "summary": "Test issue",
        "type": entity_json("bug", "Bug"),
        "priority": entity_json("critical", "Critical"),
        "createdAt": "2024-03-01T08:00:00.000+0000",
        "createdBy": user_json("alice"),
        "assignee": user_json("bob"),
        "queue": entity_json("TEST", "Test queue"),
        "updatedAt": "2024-03-01T10:30:15.123+0000",
        "status": entity_json("open", "Open"),
        "favorite": false,
        "commentWithoutExternalMessageCount": 0,
        "pendingReplyFrom": [],
    })
}

pub fn imported_json(key: &str) -> Value {
    json!({
        "self": format!("https://api.tracker.yandex.net/v2/issues/{key}"),
        "id": "6000000000000001",
        "key": key,
        "version": 1,
        "summary": "Imported issue",
        "type": entity_json("task", "Task"),
        "priority": entity_json("normal", "Normal"),
        "resolution": entity_json("fixed", "Fixed"),
        "resolvedAt": "2024-02-10T12:00:00.000+0300",
        "resolvedBy": user_json("alice"),
        "createdAt": "2024-02-01T12:00:00.000+0300",
        "createdBy": user_json("alice"),
        "queue": entity_json("TEST", "Test queue"),
        "status": entity_json("closed", "Closed"),
        "favorite": false,
    })
}

pub fn relationship_json() -> Value {
    json!({
        "self": "https://api.tracker.yandex.net/v2/issues/TEST-1/links/1048570",
        "id": "1048570",
        "type": {
            "self": "https://api.tracker.yandex.net/v2/linktypes/relates",
            "id": "relates",
            "inward": "relates",
            "outward": "relates",
        },
        "direction": "outward",
        "object": entity_json("TEST-2", "Second issue"),
        "createdBy": user_json("alice"),
        "updatedBy": user_json("alice"),
        "createdAt": "2024-03-01T08:00:00.000+0000",
        "updatedAt": "2024-03-01T08:00:00.000+0000",
    })
}

pub fn transited_json() -> Value {
    json!({
        "self": "https://api.tracker.yandex.net/v2/issues/TEST-1/transitions/close",
        "id": "close",
        "to": entity_json("closed", "Closed"),
        "screen": {
            "self": "https://api.tracker.yandex.net/v2/screens/5c4a",
            "id": "5c4a",
        },
    })
}
