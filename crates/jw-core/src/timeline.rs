//! The timeline: the ordered log of sessions for one user.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::session::Session;

/// Ordered sequence of sessions, insertion order = chronological order.
///
/// At most the last element may be open. The whole sequence is the unit of
/// persistence: every mutation is a full read-modify-write of the
/// serialized document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    #[serde(rename = "List")]
    pub list: Vec<Session>,
}

/// Aggregated duration for one issue, for reporting.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueTotal {
    pub summary: String,
    pub total: TimeDelta,
}

impl Timeline {
    /// The most recent session.
    pub fn current(&self) -> Result<&Session, Error> {
        self.list.last().ok_or(Error::EmptyTimeline)
    }

    /// The most recent session, mutably.
    pub fn current_mut(&mut self) -> Result<&mut Session, Error> {
        self.list.last_mut().ok_or(Error::EmptyTimeline)
    }

    /// Appends at the tail. Ordering is the caller's responsibility.
    pub fn push(&mut self, session: Session) {
        self.list.push(session);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Total tracked duration per issue key.
    ///
    /// Open sessions accrue against `now`. Reporting only; this performs
    /// no invariant checks.
    #[must_use]
    pub fn durations_by_issue(&self, now: DateTime<Utc>) -> BTreeMap<String, IssueTotal> {
        let mut totals: BTreeMap<String, IssueTotal> = BTreeMap::new();
        for session in &self.list {
            let spent = if session.is_finished() {
                session.duration()
            } else {
                session.activity_duration(now)
            };
            totals
                .entry(session.issue.key.clone())
                .and_modify(|entry| entry.total = entry.total + spent)
                .or_insert_with(|| IssueTotal {
                    summary: session.issue.summary.clone(),
                    total: spent,
                });
        }
        totals
    }

    /// The most recent description used for the given issue key,
    /// searching tail to head.
    #[must_use]
    pub fn last_description_for(&self, key: &str) -> Option<&str> {
        self.list
            .iter()
            .rev()
            .find(|session| session.issue.key == key)
            .map(|session| session.description.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{at, finished_session, open_session};

    #[test]
    fn current_on_empty_timeline_fails() {
        let timeline = Timeline::default();
        assert!(matches!(timeline.current(), Err(Error::EmptyTimeline)));
    }

    #[test]
    fn current_is_the_last_session() {
        let mut timeline = Timeline::default();
        timeline.push(finished_session(
            "AB-1",
            "2026-02-03T09:00:00Z",
            "2026-02-03T10:00:00Z",
        ));
        timeline.push(open_session("AB-2", "2026-02-03T10:00:00Z"));
        assert_eq!(timeline.current().unwrap().issue.key, "AB-2");
    }

    #[test]
    fn durations_accumulate_per_issue_key() {
        let mut timeline = Timeline::default();
        timeline.push(finished_session(
            "AB-1",
            "2026-02-03T09:00:00Z",
            "2026-02-03T10:00:00Z",
        ));
        timeline.push(finished_session(
            "AB-2",
            "2026-02-03T10:00:00Z",
            "2026-02-03T10:30:00Z",
        ));
        timeline.push(finished_session(
            "AB-1",
            "2026-02-03T10:30:00Z",
            "2026-02-03T11:00:00Z",
        ));

        let totals = timeline.durations_by_issue(at("2026-02-03T12:00:00Z"));
        assert_eq!(totals["AB-1"].total, TimeDelta::minutes(90));
        assert_eq!(totals["AB-2"].total, TimeDelta::minutes(30));
    }

    #[test]
    fn durations_count_open_sessions_against_now() {
        let mut timeline = Timeline::default();
        timeline.push(open_session("AB-1", "2026-02-03T09:00:00Z"));

        let totals = timeline.durations_by_issue(at("2026-02-03T09:20:00Z"));
        assert_eq!(totals["AB-1"].total, TimeDelta::minutes(20));
    }

    #[test]
    fn last_description_searches_tail_to_head() {
        let mut timeline = Timeline::default();
        let mut first = finished_session("AB-1", "2026-02-03T09:00:00Z", "2026-02-03T10:00:00Z");
        first.description = "older".to_string();
        let mut second = finished_session("AB-1", "2026-02-03T10:00:00Z", "2026-02-03T11:00:00Z");
        second.description = "newer".to_string();
        timeline.push(first);
        timeline.push(second);
        timeline.push(open_session("AB-2", "2026-02-03T11:00:00Z"));

        assert_eq!(timeline.last_description_for("AB-1"), Some("newer"));
        assert_eq!(timeline.last_description_for("AB-3"), None);
    }

    #[test]
    fn serializes_as_a_single_list_field() {
        let mut timeline = Timeline::default();
        timeline.push(Session {
            description: "wire review".to_string(),
            ..finished_session("AB-1", "2026-02-03T09:00:00Z", "2026-02-03T10:00:00Z")
        });

        let json = serde_json::to_string_pretty(&timeline).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "List": [
            {
              "finished": true,
              "startTime": "2026-02-03T09:00:00Z",
              "finishTime": "2026-02-03T10:00:00Z",
              "description": "wire review",
              "issue": {
                "id": "10001",
                "key": "AB-1",
                "summary": "summary of AB-1",
                "status": "In Progress"
              }
            }
          ]
        }
        "#);

        let parsed: Timeline = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, timeline);
    }
}
