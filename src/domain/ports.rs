//! Port traits at the seams between the client and its collaborators.

use async_trait::async_trait;

use super::errors::{ConnectionError, TrackerResult};
use super::models::{
    ConnectionRecord, IssueCreate, IssueCreated, IssueImport, IssueImported, IssueLink,
    IssueModel, IssueModify, IssueRelationship, IssueSearch, IssueTransited,
};

/// Source of named connection records.
///
/// The registry only looks records up; checking that the required fields are
/// present is the resolver's job.
pub trait ConnectionRegistry: Send + Sync {
    /// Look up a connection record by id
    ///
    /// # Returns
    /// * `Ok(record)` if the id is known (fields may still be missing)
    /// * `Err(ConnectionError::UnknownConnection)` otherwise
    fn get_connection(&self, conn_id: &str) -> Result<ConnectionRecord, ConnectionError>;
}

/// Issue operations exposed to orchestration callers.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Import an issue created in another system
    async fn import_issue(&self, request: &IssueImport) -> TrackerResult<IssueImported>;

    /// Create a new issue in a queue
    async fn create_issue(&self, request: &IssueCreate) -> TrackerResult<IssueCreated>;

    /// Apply a partial update to an issue
    async fn edit_issue(&self, issue_id: &str, request: &IssueModify) -> TrackerResult<IssueModel>;

    /// Link an issue to another one
    async fn link_issues(
        &self,
        issue_id: &str,
        request: &IssueLink,
    ) -> TrackerResult<IssueRelationship>;

    /// Execute a status transition
    async fn transit_issue(&self, issue_id: &str, transition_id: i64)
        -> TrackerResult<IssueTransited>;

    /// Search issues
    async fn search_issue(&self, request: &IssueSearch) -> TrackerResult<IssueModel>;
}
