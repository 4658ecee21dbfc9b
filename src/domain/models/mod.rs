//! Tracker schemas and configuration models.

pub mod common;
pub mod config;
pub mod connection;
pub mod issue;
pub mod wire;

pub use common::{
    EntityRef, IdKeyRef, KeyRef, LinkedKeyRef, PriorityRef, Reference, Relationship,
    ResourceRef, Tag, UserRef,
};
pub use config::{Config, LoggingConfig, RetryConfig, TransportConfig};
pub use connection::{ConnectionProfile, ConnectionRecord};
pub use issue::{
    IssueCreate, IssueCreated, IssueImport, IssueImported, IssueLink, IssueModel, IssueModify,
    IssueRelationship, IssueSearch, IssueTransited, LinkTypeRef,
};
