//! Issue request and response schemas.
//!
//! Requests skip unset fields on encode; responses tolerate missing optional
//! fields and ignore anything they do not declare.

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::common::{
    EntityRef, IdKeyRef, KeyRef, LinkedKeyRef, PriorityRef, Reference, Relationship, ResourceRef,
    Tag, UserRef,
};
use super::wire;
use crate::domain::validation::{FieldViolation, Validate, ValidationErrors};

fn now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}

/// Issue as returned by edit, create and search calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueModel {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub key: String,
    pub version: i64,
    #[serde(
        default,
        alias = "last_comment_updated_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_comment_updated_at: Option<DateTime<FixedOffset>>,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<LinkedKeyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Vec<UserRef>>,
    #[serde(rename = "type")]
    pub issue_type: EntityRef,
    pub priority: EntityRef,
    #[serde(alias = "created_at", with = "wire::datetime")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<UserRef>>,
    #[serde(alias = "created_by")]
    pub created_by: UserRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    pub queue: EntityRef,
    #[serde(
        default,
        alias = "updated_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub status: EntityRef,
    #[serde(alias = "previous_status", skip_serializing_if = "Option::is_none")]
    pub previous_status: Option<EntityRef>,
    #[serde(default)]
    pub favorite: bool,
}

/// Issue returned after a successful create call.
pub type IssueCreated = IssueModel;

/// Payload for importing an issue from another system.
///
/// `created_at` defaults to the current local time when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueImport {
    pub queue: Reference<EntityRef>,
    pub summary: String,
    #[serde(default = "now", alias = "created_at", with = "wire::datetime")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(alias = "created_by")]
    pub created_by: Reference<EntityRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(
        default,
        alias = "updated_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(alias = "updated_by", skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Reference<EntityRef>>,
    #[serde(
        default,
        alias = "resolved_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_at: Option<DateTime<FixedOffset>>,
    #[serde(alias = "resolved_by", skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<Reference<EntityRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(
        default,
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub deadline: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<Reference<EntityRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<PriorityRef>,
    #[serde(alias = "affected_versions", skip_serializing_if = "Option::is_none")]
    pub affected_versions: Option<Vec<i64>>,
    #[serde(alias = "fix_versions", skip_serializing_if = "Option::is_none")]
    pub fix_versions: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<serde_json::Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Vec<Reference<EntityRef>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Reference<UserRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<serde_json::Value>,
    #[serde(alias = "following_maillist", skip_serializing_if = "Option::is_none")]
    pub following_maillist: Option<Vec<String>>,
    #[serde(alias = "original_estimation", skip_serializing_if = "Option::is_none")]
    pub original_estimation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent: Option<i64>,
    #[serde(alias = "story_points", skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f64>,
    #[serde(alias = "voted_by", skip_serializing_if = "Option::is_none")]
    pub voted_by: Option<Vec<i64>>,
    #[serde(alias = "favorited_by", skip_serializing_if = "Option::is_none")]
    pub favorited_by: Option<Vec<i64>>,
}

impl IssueImport {
    /// Minimal import payload; every optional field starts unset.
    pub fn new(
        queue: impl Into<Reference<EntityRef>>,
        summary: impl Into<String>,
        created_by: impl Into<Reference<EntityRef>>,
    ) -> Self {
        Self {
            queue: queue.into(),
            summary: summary.into(),
            created_at: now(),
            created_by: created_by.into(),
            key: None,
            updated_at: None,
            updated_by: None,
            resolved_at: None,
            resolved_by: None,
            status: None,
            deadline: None,
            resolution: None,
            issue_type: None,
            description: None,
            start: None,
            end: None,
            assignee: None,
            priority: None,
            affected_versions: None,
            fix_versions: None,
            components: None,
            tags: None,
            sprint: None,
            followers: None,
            access: None,
            unique: None,
            following_maillist: None,
            original_estimation: None,
            estimation: None,
            spent: None,
            story_points: None,
            voted_by: None,
            favorited_by: None,
        }
    }
}

impl Validate for IssueImport {
    /// A resolved issue must say who resolved it and how.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut violations = Vec::new();
        if self.resolved_at.is_some() {
            if self.resolved_by.is_none() {
                violations.push(FieldViolation::new(
                    "resolved_by",
                    "required when resolved_at is set",
                ));
            }
            if self.resolution.is_none() {
                violations.push(FieldViolation::new(
                    "resolution",
                    "required when resolved_at is set",
                ));
            }
        }
        ValidationErrors::check(violations)
    }
}

/// Result of an import call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueImported {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub key: String,
    pub version: i64,
    pub summary: String,
    #[serde(alias = "original_estimation", skip_serializing_if = "Option::is_none")]
    pub original_estimation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spent: Option<String>,
    #[serde(alias = "updated_by", skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserRef>,
    #[serde(
        default,
        alias = "resolved_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub resolved_at: Option<DateTime<FixedOffset>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(alias = "resolved_by", skip_serializing_if = "Option::is_none")]
    pub resolved_by: Option<UserRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(alias = "following_maillist", skip_serializing_if = "Option::is_none")]
    pub following_maillist: Option<Vec<UserRef>>,
    #[serde(alias = "fix_versions", skip_serializing_if = "Option::is_none")]
    pub fix_versions: Option<Vec<UserRef>>,
    #[serde(rename = "type")]
    pub issue_type: EntityRef,
    pub priority: EntityRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<EntityRef>,
    #[serde(alias = "created_at", with = "wire::datetime")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<UserRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<UserRef>,
    #[serde(alias = "created_by")]
    pub created_by: UserRef,
    #[serde(
        alias = "comment_without_external_message_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment_without_external_message_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub votes: Option<i64>,
    #[serde(alias = "affected_versions", skip_serializing_if = "Option::is_none")]
    pub affected_versions: Option<Vec<UserRef>>,
    #[serde(
        alias = "comment_with_external_message_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment_with_external_message_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub queue: EntityRef,
    #[serde(
        default,
        alias = "updated_at",
        with = "wire::datetime_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(alias = "story_points", skip_serializing_if = "Option::is_none")]
    pub story_points: Option<f64>,
    pub status: EntityRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<UserRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<Vec<UserRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Payload for creating an issue directly in a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCreate {
    pub queue: IdKeyRef,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<IdKeyRef>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IdKeyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(alias = "attachment_ids", skip_serializing_if = "Option::is_none")]
    pub attachment_ids: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<IdKeyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<String>,
}

impl Validate for IssueCreate {}

/// Partial update of an existing issue. At least one field must be set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueModify {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<KeyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub issue_type: Option<IdKeyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    #[serde(alias = "affected_versions", skip_serializing_if = "Option::is_none")]
    pub affected_versions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<Tag>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sprint: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub followers: Option<Vec<i64>>,
}

impl IssueModify {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Validate for IssueModify {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            return ValidationErrors::check(vec![FieldViolation::new(
                "request",
                "Empty request body",
            )]);
        }
        Ok(())
    }
}

/// Link from one issue to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueLink {
    pub relationship: Relationship,
    pub issue: String,
}

impl IssueLink {
    pub fn new(relationship: Relationship, issue: impl Into<String>) -> Self {
        Self {
            relationship,
            issue: issue.into(),
        }
    }
}

impl Validate for IssueLink {}

/// Link type description embedded in a relationship.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkTypeRef {
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inward: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outward: Option<String>,
}

/// Result of a link call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRelationship {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    #[serde(rename = "type")]
    pub link_type: LinkTypeRef,
    pub direction: String,
    pub object: EntityRef,
    #[serde(alias = "created_by")]
    pub created_by: UserRef,
    #[serde(alias = "updated_by")]
    pub updated_by: UserRef,
    #[serde(alias = "created_at", with = "wire::datetime")]
    pub created_at: DateTime<FixedOffset>,
    #[serde(alias = "updated_at", with = "wire::datetime")]
    pub updated_at: DateTime<FixedOffset>,
}

/// Result of executing a status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueTransited {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub to: EntityRef,
    pub screen: ResourceRef,
}

/// Search request; set exactly the criteria you need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub queue: Option<String>,
}

impl IssueSearch {
    /// Search by query-language expression.
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }
}

impl Validate for IssueSearch {}
