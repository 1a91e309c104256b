//! Domain errors.
//!
//! Every error here is terminal for the current invocation; nothing is
//! retried internally. The one recovery path is `publish`, which persists
//! the unsent remainder of the timeline before surfacing
//! [`Error::WorklogSubmissionFailed`] so a re-run resumes where it failed.

use thiserror::Error;

use crate::store::StoreError;
use crate::tracker::TrackerError;

/// Errors produced by the timeline state machine, the tag resolver and the
/// publish coordinator.
#[derive(Debug, Error)]
pub enum Error {
    /// The timeline has no sessions at all.
    #[error("timeline is empty")]
    EmptyTimeline,

    /// `start` was called while the current session is still open.
    #[error("current session is not finished yet")]
    PreviousSessionUnfinished,

    /// `stop` was called but the current session is already finished.
    #[error("current session is already finished")]
    SessionAlreadyFinished,

    /// An explicit description and description reuse were both requested.
    #[error("use either an explicit description or the previous one, not both")]
    ConflictingDescriptionOptions,

    /// Description reuse was requested but no earlier session matches.
    #[error("no earlier session for {key} to take the description from")]
    PriorDescriptionNotFound { key: String },

    /// The issue status is not in the configured allow-list for starting.
    #[error("issue status must be one of '{}' to start, actual is '{actual}'", allowed.join(","))]
    StatusNotAllowed {
        allowed: Vec<String>,
        actual: String,
    },

    /// `edit` addressed a position outside the timeline.
    #[error("no session at index {index}")]
    RecordNotFound { index: usize },

    /// The new start time precedes the previous session's finish time.
    #[error("start time cannot precede the previous session's finish time")]
    StartBeforePriorFinish,

    /// The finish time of an open session cannot be edited.
    #[error("finish time cannot be edited while the session is open")]
    EditFinishOnOpenSession,

    /// The new finish time passes the next session's start time.
    #[error("finish time cannot pass the next session's start time")]
    FinishAfterNextStart,

    /// The tracker could not resolve an issue reference.
    #[error("issue lookup failed: {source}")]
    TicketLookupFailed { source: TrackerError },

    /// An explicit tag and the no-tag flag were both given.
    #[error("use either a tag or the no-tag flag, not both")]
    ConflictingTagOptions,

    /// The given tag is not in the configured set.
    #[error("tag '{tag}' is not in the configured set")]
    UnknownTag { tag: String },

    /// The interactive tag selection was not a usable index.
    #[error("'{input}' is not a valid tag index")]
    TagIndexOutOfRange { input: String },

    /// An unknown key was passed to the config set operation.
    #[error("unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// The tracker could not resolve the submitting identity.
    #[error("identity lookup failed: {source}")]
    IdentityLookupFailed { source: TrackerError },

    /// A worklog submission was rejected; the unsent remainder of the
    /// timeline has already been persisted for retry.
    #[error("worklog #{index} for issue {key} was rejected: {source}")]
    WorklogSubmissionFailed {
        index: usize,
        key: String,
        source: TrackerError,
    },

    /// The storage collaborator failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A persisted document could not be (de)serialized.
    #[error("stored document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Reading interactive input failed.
    #[error("could not read input: {0}")]
    Input(#[from] std::io::Error),
}
