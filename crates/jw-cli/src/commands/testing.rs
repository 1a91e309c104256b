//! Shared fixtures for command tests.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use jw_core::machine::TIMELINE_DOC;
use jw_core::{
    Config, ConfigStore, IssueRef, IssueTracker, MemoryStore, Session, Store, Timeline,
    TrackerError, User, WorklogEntry,
};

pub(crate) fn at(rfc3339: &str) -> DateTime<Utc> {
    rfc3339.parse().unwrap()
}

pub(crate) fn issue(key: &str) -> IssueRef {
    IssueRef {
        id: "10001".to_string(),
        key: key.to_string(),
        summary: format!("summary of {key}"),
        status: "In Progress".to_string(),
    }
}

pub(crate) fn open_session(key: &str, start: &str) -> Session {
    Session::started(issue(key), at(start))
}

pub(crate) fn finished_session(key: &str, start: &str, finish: &str) -> Session {
    let mut session = open_session(key, start);
    session.finish(at(finish));
    session
}

/// A store pre-seeded with a config document and a timeline, the state
/// `jw init` plus some tracking would leave behind.
pub(crate) fn seed_store(config: &Config, timeline: &Timeline) -> MemoryStore {
    let store = MemoryStore::new();
    ConfigStore::new(&store).save(config).unwrap();
    store
        .write(TIMELINE_DOC, &serde_json::to_vec(timeline).unwrap())
        .unwrap();
    store
}

pub(crate) fn stored_timeline(store: &MemoryStore) -> Timeline {
    serde_json::from_slice(&store.document(TIMELINE_DOC).unwrap()).unwrap()
}

/// Scripted tracker for command tests.
pub(crate) struct FakeTracker {
    pub reject_keys: HashSet<String>,
    pub submitted: RefCell<Vec<String>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self {
            reject_keys: HashSet::new(),
            submitted: RefCell::new(Vec::new()),
        }
    }

    pub fn rejecting(keys: &[&str]) -> Self {
        let mut tracker = Self::new();
        tracker.reject_keys = keys.iter().map(ToString::to_string).collect();
        tracker
    }
}

impl IssueTracker for FakeTracker {
    fn issue(&self, id: &str) -> Result<IssueRef, TrackerError> {
        Ok(issue(id))
    }

    fn current_user(&self) -> Result<User, TrackerError> {
        Ok(User {
            name: "worker".to_string(),
            display_name: "Worker".to_string(),
        })
    }

    fn add_worklog(&self, issue: &IssueRef, _entry: &WorklogEntry) -> Result<(), TrackerError> {
        if self.reject_keys.contains(&issue.key) {
            return Err(TrackerError::with_status(400, "worklog rejected"));
        }
        self.submitted.borrow_mut().push(issue.key.clone());
        Ok(())
    }
}
