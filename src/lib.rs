//! Yatracker - typed Yandex Tracker issue client
//!
//! A thin, typed adapter over the tracker REST API for orchestration code:
//! issue import, creation, editing, linking, status transitions and search.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): request/response schemas, validation,
//!   error taxonomy and the `ConnectionRegistry` / `IssueTracker` ports
//! - **Infrastructure Layer** (`infrastructure`): the retrying HTTP client,
//!   connection resolution, configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use yatracker::domain::models::{ConnectionRecord, IssueSearch};
//! use yatracker::infrastructure::connection::StaticConnectionRegistry;
//! use yatracker::{TrackerClient, TrackerClientConfig};
//!
//! # async fn example() -> yatracker::TrackerResult<()> {
//! let registry = StaticConnectionRegistry::new().with_connection(
//!     "yatracker_default",
//!     ConnectionRecord::new("https://api.tracker.yandex.net", "<oauth token>", "<org id>"),
//! );
//! let client = TrackerClient::new(Arc::new(registry), TrackerClientConfig::default());
//!
//! let issue = client
//!     .search_issue(&IssueSearch::query("priority: critical"))
//!     .await?;
//! println!("{}", issue.key);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types for convenience
pub use domain::errors::{ConnectionError, TrackerApiError, TrackerError, TrackerResult};
pub use domain::models::{
    Config, ConnectionProfile, ConnectionRecord, IssueCreate, IssueCreated, IssueImport,
    IssueImported, IssueLink, IssueModel, IssueModify, IssueRelationship, IssueSearch,
    IssueTransited, LoggingConfig, Relationship, RetryConfig, TransportConfig,
};
pub use domain::ports::{ConnectionRegistry, IssueTracker};
pub use domain::validation::{FieldViolation, Validate, ValidationErrors};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::tracker::{RetryPolicy, TrackerClient, TrackerClientConfig};
