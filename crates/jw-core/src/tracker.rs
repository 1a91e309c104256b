//! Issue tracker collaborator contract.
//!
//! The tracker resolves issue references, identifies the submitting user
//! and accepts worklog entries. The concrete Jira client lives in the
//! `jw-jira` crate; tests use scripted fakes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Cached identifying and display data about a tracker issue.
///
/// The `id` is the tracker's opaque identifier; `key`, `summary` and
/// `status` are display fields cached at resolution time and refreshed
/// when the session is edited onto another issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRef {
    pub id: String,
    pub key: String,
    pub summary: String,
    pub status: String,
}

/// The identity a worklog entry is submitted as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
}

/// One worklog submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorklogEntry {
    pub author: User,
    pub started: DateTime<Utc>,
    pub time_spent_seconds: i64,
    pub comment: String,
}

/// A failure reported by the tracker collaborator.
///
/// Carries the remote status code when the failure came from an HTTP
/// response, so publish and edit errors can name it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct TrackerError {
    pub status: Option<u16>,
    pub message: String,
}

impl TrackerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn with_status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }
}

impl fmt::Display for TrackerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "remote status {status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Issue tracker capability consumed by the core.
pub trait IssueTracker {
    /// Resolves an issue by key or opaque id.
    fn issue(&self, id: &str) -> Result<IssueRef, TrackerError>;

    /// Resolves the identity of the authenticated user.
    fn current_user(&self) -> Result<User, TrackerError>;

    /// Submits one worklog entry against an issue.
    fn add_worklog(&self, issue: &IssueRef, entry: &WorklogEntry) -> Result<(), TrackerError>;
}
