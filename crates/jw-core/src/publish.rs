//! The publish coordinator: submits unsent sessions to the tracker and
//! resets the local timeline, surviving mid-batch failures.
//!
//! Durability is per record, not transactional across the batch: when a
//! submission fails, the unsent remainder (including the failed record) is
//! persisted *before* the error is surfaced, so a re-run resumes at the
//! failure point without resubmitting or dropping anything.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Error;
use crate::machine::TIMELINE_DOC;
use crate::store::Store;
use crate::timeline::Timeline;
use crate::tracker::{IssueTracker, WorklogEntry};

/// Sessions at or under this tracked duration are skipped, to keep noise
/// entries out of the tracker.
const MIN_WORKLOG_SECONDS: i64 = 60;

/// Outcome of a successful publish run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub submitted: usize,
    pub skipped: usize,
}

/// Submits the timeline to the tracker as worklog entries.
pub struct Publisher<'a, S: Store + ?Sized, T: IssueTracker + ?Sized> {
    store: &'a S,
    tracker: &'a T,
}

impl<'a, S: Store + ?Sized, T: IssueTracker + ?Sized> Publisher<'a, S, T> {
    pub const fn new(store: &'a S, tracker: &'a T) -> Self {
        Self { store, tracker }
    }

    /// Publishes every sufficiently long session, in timeline order.
    ///
    /// The submitting identity is resolved once up front; if that fails
    /// nothing is submitted. On a submission failure the persisted
    /// timeline is replaced by the records strictly after the last
    /// submitted one, then [`Error::WorklogSubmissionFailed`] is returned.
    /// A fully successful run persists an empty timeline.
    pub fn publish(&self) -> Result<PublishReport, Error> {
        let timeline = self.load()?;
        let user = self
            .tracker
            .current_user()
            .map_err(|source| Error::IdentityLookupFailed { source })?;

        let mut last_submitted: Option<usize> = None;
        let mut report = PublishReport::default();

        for (index, session) in timeline.list.iter().enumerate() {
            let duration = session.duration();
            if duration.num_seconds() <= MIN_WORKLOG_SECONDS {
                tracing::info!(
                    index,
                    issue = %session.issue.key,
                    "not sent, duration is a minute or less"
                );
                report.skipped += 1;
                continue;
            }

            let entry = WorklogEntry {
                author: user.clone(),
                // The tracker rejects timestamps that are not strictly
                // inside the day; the millisecond keeps it off the exact
                // second boundary.
                started: round_to_second(session.start_time) + TimeDelta::milliseconds(1),
                time_spent_seconds: duration.num_seconds(),
                comment: session.worklog_comment(),
            };

            if let Err(source) = self.tracker.add_worklog(&session.issue, &entry) {
                let first_unsent = last_submitted.map_or(0, |sent| sent + 1);
                let remainder = Timeline {
                    list: timeline.list[first_unsent..].to_vec(),
                };
                if let Err(save_err) = self.save(&remainder) {
                    tracing::error!(
                        error = %save_err,
                        first_unsent,
                        "could not persist unsent sessions"
                    );
                } else {
                    tracing::warn!(
                        kept = remainder.list.len(),
                        "submission failed, unsent sessions kept for retry"
                    );
                }
                return Err(Error::WorklogSubmissionFailed {
                    index,
                    key: session.issue.key.clone(),
                    source,
                });
            }
            last_submitted = Some(index);
            report.submitted += 1;
        }

        self.save(&Timeline::default())?;
        Ok(report)
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

/// Rounds half away from zero to a whole second.
fn round_to_second(time: DateTime<Utc>) -> DateTime<Utc> {
    let seconds = if time.timestamp_subsec_millis() >= 500 {
        time.timestamp() + 1
    } else {
        time.timestamp()
    };
    DateTime::from_timestamp(seconds, 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::testing::{FakeTracker, at, finished_session};
    use crate::tracker::TrackerError;

    fn seed(store: &MemoryStore, timeline: &Timeline) {
        store
            .write(TIMELINE_DOC, &serde_json::to_vec(timeline).unwrap())
            .unwrap();
    }

    fn stored_timeline(store: &MemoryStore) -> Timeline {
        serde_json::from_slice(&store.document(TIMELINE_DOC).unwrap()).unwrap()
    }

    fn three_sessions() -> Timeline {
        let mut timeline = Timeline::default();
        timeline.push(finished_session(
            "AB-1",
            "2026-02-03T09:00:00Z",
            "2026-02-03T10:00:00Z",
        ));
        timeline.push(finished_session(
            "AB-2",
            "2026-02-03T10:00:00Z",
            "2026-02-03T11:00:00Z",
        ));
        timeline.push(finished_session(
            "AB-3",
            "2026-02-03T11:00:00Z",
            "2026-02-03T12:00:00Z",
        ));
        timeline
    }

    #[test]
    fn successful_publish_submits_everything_and_empties_the_timeline() {
        let store = MemoryStore::new();
        let tracker = FakeTracker::new();
        seed(&store, &three_sessions());

        let report = Publisher::new(&store, &tracker).publish().unwrap();
        assert_eq!(report.submitted, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(tracker.submitted_keys(), vec!["AB-1", "AB-2", "AB-3"]);
        assert!(stored_timeline(&store).is_empty());
    }

    #[test]
    fn mid_batch_failure_keeps_the_unsent_remainder() {
        let store = MemoryStore::new();
        let tracker = FakeTracker::rejecting(&["AB-2"]);
        seed(&store, &three_sessions());

        let err = Publisher::new(&store, &tracker).publish().unwrap_err();
        match err {
            Error::WorklogSubmissionFailed { index, key, source } => {
                assert_eq!(index, 1);
                assert_eq!(key, "AB-2");
                assert_eq!(source.status, Some(400));
            }
            other => panic!("expected WorklogSubmissionFailed, got {other:?}"),
        }

        // Session 1 was durably removed; 2 and 3 remain for retry.
        let remaining = stored_timeline(&store);
        let keys: Vec<_> = remaining.list.iter().map(|s| s.issue.key.clone()).collect();
        assert_eq!(keys, vec!["AB-2", "AB-3"]);
    }

    #[test]
    fn retry_after_failure_resumes_and_empties_the_timeline() {
        let store = MemoryStore::new();
        let failing = FakeTracker::rejecting(&["AB-2"]);
        seed(&store, &three_sessions());
        assert!(Publisher::new(&store, &failing).publish().is_err());

        let tracker = FakeTracker::new();
        let report = Publisher::new(&store, &tracker).publish().unwrap();
        assert_eq!(report.submitted, 2);
        assert_eq!(tracker.submitted_keys(), vec!["AB-2", "AB-3"]);
        assert!(stored_timeline(&store).is_empty());
    }

    #[test]
    fn failure_on_the_first_record_keeps_the_whole_timeline() {
        let store = MemoryStore::new();
        let tracker = FakeTracker::rejecting(&["AB-1"]);
        seed(&store, &three_sessions());

        assert!(Publisher::new(&store, &tracker).publish().is_err());
        assert_eq!(stored_timeline(&store).len(), 3);
        assert!(tracker.submitted_keys().is_empty());
    }

    #[test]
    fn short_sessions_are_skipped_not_submitted() {
        let store = MemoryStore::new();
        let tracker = FakeTracker::new();
        let mut timeline = Timeline::default();
        timeline.push(finished_session(
            "AB-1",
            "2026-02-03T09:00:00Z",
            "2026-02-03T09:00:30Z",
        ));
        timeline.push(finished_session(
            "AB-2",
            "2026-02-03T09:01:00Z",
            "2026-02-03T09:02:30Z",
        ));
        seed(&store, &timeline);

        let report = Publisher::new(&store, &tracker).publish().unwrap();
        assert_eq!(report.submitted, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(tracker.submitted_keys(), vec!["AB-2"]);
        assert!(stored_timeline(&store).is_empty());
    }

    #[test]
    fn identity_failure_submits_nothing_and_keeps_the_timeline() {
        let store = MemoryStore::new();
        let mut tracker = FakeTracker::new();
        tracker.user = Err(TrackerError::with_status(401, "unauthorized"));
        seed(&store, &three_sessions());

        assert!(matches!(
            Publisher::new(&store, &tracker).publish(),
            Err(Error::IdentityLookupFailed { .. })
        ));
        assert!(tracker.submitted_keys().is_empty());
        assert_eq!(stored_timeline(&store).len(), 3);
    }

    #[test]
    fn entries_round_start_times_and_carry_the_tag_comment() {
        let store = MemoryStore::new();
        let tracker = FakeTracker::new();
        let mut timeline = Timeline::default();
        let mut session = finished_session(
            "AB-1",
            "2026-02-03T09:00:00.800Z",
            "2026-02-03T10:00:00.800Z",
        );
        session.description = "pairing on the parser".to_string();
        session.tag = Some("dev".to_string());
        timeline.push(session);
        seed(&store, &timeline);

        Publisher::new(&store, &tracker).publish().unwrap();
        let submitted = tracker.submitted.borrow();
        let (_, entry) = &submitted[0];
        assert_eq!(entry.started, at("2026-02-03T09:00:01.001Z"));
        assert_eq!(entry.time_spent_seconds, 3600);
        assert_eq!(entry.comment, "#dev pairing on the parser");
        assert_eq!(entry.author.name, "worker");
    }
}
