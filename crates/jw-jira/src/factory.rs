//! Lazy client construction from stored credentials.

use std::cell::RefCell;

use jw_core::{IssueRef, IssueTracker, Store, TrackerError, User, WorklogEntry};

use crate::client::JiraClient;
use crate::creds::CredsStore;

/// An [`IssueTracker`] that builds the Jira client on first use.
///
/// Commands that never touch the tracker (stop, plain edits) work without
/// stored credentials; the first real call loads them and fails with a
/// pointer to `login` when they are missing.
pub struct Factory<'a, S: Store + ?Sized> {
    creds: CredsStore<'a, S>,
    client: RefCell<Option<JiraClient>>,
}

impl<'a, S: Store + ?Sized> Factory<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self {
            creds: CredsStore::new(store),
            client: RefCell::new(None),
        }
    }

    fn client(&self) -> Result<JiraClient, TrackerError> {
        if let Some(client) = self.client.borrow().as_ref() {
            return Ok(client.clone());
        }
        let creds = self.creds.load().map_err(|err| {
            TrackerError::new(format!("no usable credentials ({err}), run 'jw login' first"))
        })?;
        let client = JiraClient::new(&creds)?;
        *self.client.borrow_mut() = Some(client.clone());
        Ok(client)
    }
}

impl<S: Store + ?Sized> IssueTracker for Factory<'_, S> {
    fn issue(&self, id: &str) -> Result<IssueRef, TrackerError> {
        self.client()?.issue(id)
    }

    fn current_user(&self) -> Result<User, TrackerError> {
        self.client()?.current_user()
    }

    fn add_worklog(&self, issue: &IssueRef, entry: &WorklogEntry) -> Result<(), TrackerError> {
        self.client()?.add_worklog(issue, entry)
    }
}
