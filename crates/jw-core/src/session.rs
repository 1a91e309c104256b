//! The session record: one tracked interval of work against an issue.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::tracker::IssueRef;

/// One tracked work interval.
///
/// `finish_time` is `None` exactly while the session is open; `stop` sets
/// both `finished` and `finish_time` together. The description stays
/// mutable through `edit`, everything else only moves through the state
/// machine's operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub finished: bool,
    pub start_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub issue: IssueRef,
}

impl Session {
    /// Creates an open session starting now.
    #[must_use]
    pub fn started(issue: IssueRef, now: DateTime<Utc>) -> Self {
        Self {
            finished: false,
            start_time: now,
            finish_time: None,
            description: String::new(),
            tag: None,
            issue,
        }
    }

    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Finalizes the session.
    pub fn finish(&mut self, now: DateTime<Utc>) {
        self.finished = true;
        self.finish_time = Some(now);
    }

    /// Tracked duration, rounded to whole seconds.
    ///
    /// Zero while the session is open; the publish filter relies on this
    /// so open sessions are never submitted.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        match self.finish_time {
            Some(finish) if self.finished => round_to_seconds(finish - self.start_time),
            _ => TimeDelta::zero(),
        }
    }

    /// Elapsed time since the session started, rounded to whole seconds.
    #[must_use]
    pub fn activity_duration(&self, now: DateTime<Utc>) -> TimeDelta {
        round_to_seconds(now - self.start_time)
    }

    /// The worklog comment: the description, prefixed with `#tag ` when a
    /// tag is set.
    #[must_use]
    pub fn worklog_comment(&self) -> String {
        match &self.tag {
            Some(tag) => format!("#{tag} {}", self.description),
            None => self.description.clone(),
        }
    }
}

/// Rounds half away from zero, like the durations shown to the user.
fn round_to_seconds(delta: TimeDelta) -> TimeDelta {
    let ms = delta.num_milliseconds();
    let half = if ms >= 0 { 500 } else { -500 };
    TimeDelta::seconds((ms + half) / 1000)
}
