//! Issue data structure
//!
//! The local record a bridge imports into or exports from.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Length of the short, human-facing form of an id
pub const HUMAN_ID_LEN: usize = 7;

/// Type-safe wrapper for issue IDs
///
/// Format: 32 lowercase hex characters (a v4 uuid without hyphens).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueId(String);

impl IssueId {
    /// Create a new IssueId from a string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Get the underlying string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short prefix shown to users (e.g. "3f2a9c1")
    pub fn human(&self) -> &str {
        match self.0.char_indices().nth(HUMAN_ID_LEN) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl fmt::Display for IssueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for IssueId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Issue status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Open => write!(f, "open"),
            Status::Closed => write!(f, "closed"),
        }
    }
}

/// A locally stored issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: IssueId,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Status,
    /// RFC 3339 creation time
    pub created_at: String,
    /// Connector bookkeeping (e.g. origin system and remote id)
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl Issue {
    /// Create a new open issue with a fresh id
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: IssueId::generate(),
            title: title.into(),
            message: message.into(),
            status: Status::Open,
            created_at: chrono::Utc::now().to_rfc3339(),
            metadata: BTreeMap::new(),
        }
    }

    /// Short id shown to users
    pub fn human_id(&self) -> &str {
        self.id.human()
    }

    /// Attach a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}
