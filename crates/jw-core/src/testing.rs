//! Shared fixtures for unit tests: session builders and a scripted
//! tracker fake satisfying the [`IssueTracker`] contract.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::session::Session;
use crate::tracker::{IssueRef, IssueTracker, TrackerError, User, WorklogEntry};

pub(crate) fn issue(key: &str) -> IssueRef {
    IssueRef {
        id: "10001".to_string(),
        key: key.to_string(),
        summary: format!("summary of {key}"),
        status: "In Progress".to_string(),
    }
}

pub(crate) fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

pub(crate) fn open_session(key: &str, start: &str) -> Session {
    Session::started(issue(key), at(start))
}

pub(crate) fn finished_session(key: &str, start: &str, finish: &str) -> Session {
    let mut session = open_session(key, start);
    session.finish(at(finish));
    session
}

/// Scripted tracker: resolves any issue key, optionally with a fixed
/// status, rejects worklogs for configured keys, and records every
/// submission it accepts.
pub(crate) struct FakeTracker {
    pub status: String,
    pub user: Result<User, TrackerError>,
    pub reject_keys: HashSet<String>,
    pub fail_lookups: bool,
    pub submitted: RefCell<Vec<(String, WorklogEntry)>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            status: "In Progress".to_string(),
            user: Ok(User {
                name: "worker".to_string(),
                display_name: "Worker".to_string(),
            }),
            reject_keys: HashSet::new(),
            fail_lookups: false,
            submitted: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting(keys: &[&str]) -> Self {
        let mut tracker = Self::new();
        tracker.reject_keys = keys.iter().map(ToString::to_string).collect();
        tracker
    }

    pub fn submitted_keys(&self) -> Vec<String> {
        self.submitted
            .borrow()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl IssueTracker for FakeTracker {
    fn issue(&self, id: &str) -> Result<IssueRef, TrackerError> {
        if self.fail_lookups {
            return Err(TrackerError::with_status(404, format!("no issue {id}")));
        }
        let mut resolved = issue(id);
        resolved.status = self.status.clone();
        Ok(resolved)
    }

    fn current_user(&self) -> Result<User, TrackerError> {
        self.user.clone()
    }

    fn add_worklog(&self, issue: &IssueRef, entry: &WorklogEntry) -> Result<(), TrackerError> {
        if self.reject_keys.contains(&issue.key) {
            return Err(TrackerError::with_status(400, "worklog rejected"));
        }
        self.submitted
            .borrow_mut()
            .push((issue.key.clone(), entry.clone()));
        Ok(())
    }
}
