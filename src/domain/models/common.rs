//! Reference shapes shared across issue schemas.
//!
//! The tracker embeds related entities (queues, users, statuses, ...) as small
//! objects carrying a subset of `self`, `id`, `key` and `display`.

use serde::{Deserialize, Serialize};

/// `{ id, key }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdKeyRef {
    pub id: String,
    pub key: String,
}

/// User or other entity identified by link, id and display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub display: String,
}

/// `{ self, id, key }`, used for parent issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkedKeyRef {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub key: String,
}

/// Fully described entity: queues, statuses, priorities, issue types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
    pub key: String,
    pub display: String,
}

/// `{ self, id }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRef {
    #[serde(rename = "self")]
    pub self_link: String,
    pub id: String,
}

/// `{ key }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRef {
    pub key: String,
}

/// Either a bare key/login string or a full reference object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Key(String),
    Object(T),
}

impl<T> From<&str> for Reference<T> {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl<T> From<String> for Reference<T> {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

/// Priority given by numeric id, key, or full reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriorityRef {
    Id(i64),
    Key(String),
    Object(EntityRef),
}

/// Tag value; the tracker accepts both strings and numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Number(i64),
    Text(String),
}

/// Link type between two issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    #[serde(rename = "relates")]
    Relates,
    #[serde(rename = "dependent")]
    Dependent,
    #[serde(rename = "depends")]
    DependsOn,
    #[serde(rename = "subtask")]
    Subtask,
    #[serde(rename = "parent")]
    Parent,
    #[serde(rename = "duplicates")]
    Duplicates,
    #[serde(rename = "duplicated")]
    Duplicated,
    #[serde(rename = "epic")]
    Epic,
}

impl Relationship {
    /// Wire value of the relationship.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Relates => "relates",
            Self::Dependent => "dependent",
            Self::DependsOn => "depends",
            Self::Subtask => "subtask",
            Self::Parent => "parent",
            Self::Duplicates => "duplicates",
            Self::Duplicated => "duplicated",
            Self::Epic => "epic",
        }
    }
}

impl std::fmt::Display for Relationship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Relationship {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relates" => Ok(Self::Relates),
            "dependent" => Ok(Self::Dependent),
            "depends" => Ok(Self::DependsOn),
            "subtask" => Ok(Self::Subtask),
            "parent" => Ok(Self::Parent),
            "duplicates" => Ok(Self::Duplicates),
            "duplicated" => Ok(Self::Duplicated),
            "epic" => Ok(Self::Epic),
            other => Err(format!("unknown relationship: {other}")),
        }
    }
}
