//! The session state machine: the only writer of the timeline.
//!
//! Guards the single-open-session invariant and chronological sanity, and
//! performs one full read-modify-write of the persisted timeline per
//! operation. Collaborators are injected so the machine can be driven by
//! in-memory fakes.

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::error::Error;
use crate::session::Session;
use crate::store::Store;
use crate::timeline::Timeline;
use crate::tracker::IssueTracker;

/// Name of the timeline document in the store.
pub const TIMELINE_DOC: &str = "timeline";

/// Options for starting a session.
#[derive(Debug, Clone, Default)]
pub struct StartOptions {
    /// Explicit one-line description.
    pub description: Option<String>,
    /// Reuse the most recent description used for the same issue.
    pub use_prev_description: bool,
    /// Tag resolved ahead of time (see [`crate::tag::resolve`]).
    pub tag: Option<String>,
}

/// A per-field edit instruction, keeping "no change requested" distinct
/// from "set to empty".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Keep,
    Set(T),
}

// Manual impl: the derived one would require `T: Default` even though
// `Keep` carries no value.
impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Keep => None,
            Self::Set(value) => Some(value),
        }
    }
}

/// Requested edits for one timeline record. All fields are validated
/// before any of them is applied.
#[derive(Debug, Clone, Default)]
pub struct EditPatch {
    /// `Set(String::new())` clears the description.
    pub description: Patch<String>,
    pub start_time: Patch<DateTime<Utc>>,
    pub finish_time: Patch<DateTime<Utc>>,
    /// New issue id or key; re-resolved through the tracker.
    pub issue: Patch<String>,
}

/// Start/stop/edit operations over the persisted timeline.
pub struct SessionMachine<'a, S: Store + ?Sized, T: IssueTracker + ?Sized> {
    store: &'a S,
    tracker: &'a T,
    config: Config,
}

impl<'a, S: Store + ?Sized, T: IssueTracker + ?Sized> SessionMachine<'a, S, T> {
    pub const fn new(store: &'a S, tracker: &'a T, config: Config) -> Self {
        Self {
            store,
            tracker,
            config,
        }
    }

    /// Persists an empty timeline. Called once at application init.
    pub fn init(&self) -> Result<(), Error> {
        self.save(&Timeline::default())
    }

    /// Loads the whole timeline.
    pub fn timeline(&self) -> Result<Timeline, Error> {
        self.load()
    }

    /// The most recent session.
    pub fn current(&self) -> Result<Session, Error> {
        Ok(self.load()?.current()?.clone())
    }

    /// Starts tracking a new session against the given issue.
    ///
    /// The open-session precondition is checked before any tracker call,
    /// so a refused start never touches the network or the stored
    /// timeline.
    pub fn start(&self, issue_id: &str, opts: &StartOptions) -> Result<Session, Error> {
        if opts.description.is_some() && opts.use_prev_description {
            return Err(Error::ConflictingDescriptionOptions);
        }

        let mut timeline = self.load()?;
        if let Ok(current) = timeline.current() {
            if !current.is_finished() {
                return Err(Error::PreviousSessionUnfinished);
            }
        }

        let issue = self
            .tracker
            .issue(issue_id)
            .map_err(|source| Error::TicketLookupFailed { source })?;

        if !self.config.statuses_for_start.is_empty()
            && !self
                .config
                .statuses_for_start
                .iter()
                .any(|status| *status == issue.status)
        {
            return Err(Error::StatusNotAllowed {
                allowed: self.config.statuses_for_start.clone(),
                actual: issue.status,
            });
        }

        let description = if opts.use_prev_description {
            timeline
                .last_description_for(&issue.key)
                .ok_or_else(|| Error::PriorDescriptionNotFound {
                    key: issue.key.clone(),
                })?
                .to_string()
        } else {
            opts.description.clone().unwrap_or_default()
        };

        let mut session = Session::started(issue, Utc::now());
        session.description = description;
        session.tag = opts.tag.clone();

        tracing::debug!(issue = %session.issue.key, "starting session");
        timeline.push(session.clone());
        self.save(&timeline)?;
        Ok(session)
    }

    /// Finishes the current session.
    pub fn stop(&self) -> Result<Session, Error> {
        let mut timeline = self.load()?;
        let current = timeline.current_mut()?;
        if current.is_finished() {
            return Err(Error::SessionAlreadyFinished);
        }
        current.finish(Utc::now());
        let stopped = current.clone();

        tracing::debug!(issue = %stopped.issue.key, "stopping session");
        self.save(&timeline)?;
        Ok(stopped)
    }

    /// Applies a patch to the record at `index`.
    ///
    /// All requested edits are validated up front; on any failure nothing
    /// is applied and nothing is persisted. Timestamp validation is
    /// point-local: only the immediate previous and next neighbors are
    /// checked, global monotonicity is not re-established.
    pub fn edit(&self, index: usize, patch: &EditPatch) -> Result<Session, Error> {
        let mut timeline = self.load()?;
        if index >= timeline.len() {
            return Err(Error::RecordNotFound { index });
        }

        if let Some(start) = patch.start_time.as_set() {
            if index > 0 {
                let prev = &timeline.list[index - 1];
                if prev.finish_time.is_some_and(|finish| *start < finish) {
                    return Err(Error::StartBeforePriorFinish);
                }
            }
        }

        if let Some(finish) = patch.finish_time.as_set() {
            if !timeline.list[index].is_finished() {
                return Err(Error::EditFinishOnOpenSession);
            }
            if let Some(next) = timeline.list.get(index + 1) {
                if next.start_time < *finish {
                    return Err(Error::FinishAfterNextStart);
                }
            }
        }

        let issue = match patch.issue.as_set() {
            Some(id) => Some(
                self.tracker
                    .issue(id)
                    .map_err(|source| Error::TicketLookupFailed { source })?,
            ),
            None => None,
        };

        // Everything validated; apply and persist once.
        let record = &mut timeline.list[index];
        if let Some(description) = patch.description.as_set() {
            record.description = description.clone();
        }
        if let Some(start) = patch.start_time.as_set() {
            record.start_time = *start;
        }
        if let Some(finish) = patch.finish_time.as_set() {
            record.finish_time = Some(*finish);
        }
        if let Some(issue) = issue {
            record.issue = issue;
        }
        let edited = record.clone();

        tracing::debug!(index, issue = %edited.issue.key, "edited session");
        self.save(&timeline)?;
        Ok(edited)
    }

    fn load(&self) -> Result<Timeline, Error> {
        let data = self.store.read(TIMELINE_DOC)?;
        Ok(serde_json::from_slice(&data)?)
    }

    fn save(&self, timeline: &Timeline) -> Result<(), Error> {
        let data = serde_json::to_vec(timeline)?;
        self.store.write(TIMELINE_DOC, &data)?;
        Ok(())
    }
}
