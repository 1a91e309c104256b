//! Show command: the tracked timeline, gaps included.

use std::io::Write;

use anyhow::Result;
use chrono::{DateTime, TimeDelta, Utc};

use jw_core::{ConfigStore, IssueTracker, SessionMachine, Store};

use super::util::{format_duration, format_local};

pub fn run<W: Write, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    store: &S,
    tracker: &T,
) -> Result<()> {
    let config = ConfigStore::new(store).load()?;
    let machine = SessionMachine::new(store, tracker, config);
    let timeline = machine.timeline()?;

    if timeline.is_empty() {
        writeln!(writer, "Nothing tracked yet")?;
        return Ok(());
    }

    let now = Utc::now();
    let mut total = TimeDelta::zero();
    let mut prev_finish: Option<DateTime<Utc>> = None;

    for (index, session) in timeline.list.iter().enumerate() {
        if let Some(finish) = prev_finish {
            writeln!(
                writer,
                "   do nothing for {}",
                format_duration(session.start_time - finish)
            )?;
        }

        writeln!(
            writer,
            "{index:>2} {} {} {}",
            format_local(session.start_time),
            session.issue.key,
            session.issue.summary
        )?;
        let comment = session.worklog_comment();
        if !comment.trim().is_empty() {
            writeln!(writer, "   + {comment}")?;
        }

        if session.is_finished() {
            total = total + session.duration();
            // The open session is always last, so finish_time is set here.
            if let Some(finish) = session.finish_time {
                writeln!(
                    writer,
                    "   {} duration {}",
                    format_local(finish),
                    format_duration(session.duration())
                )?;
            }
        } else {
            total = total + session.activity_duration(now);
            writeln!(
                writer,
                "   activity {}",
                format_duration(session.activity_duration(now))
            )?;
        }
        prev_finish = session.finish_time;
    }

    writeln!(writer)?;
    writeln!(writer, "By issue:")?;
    for (key, totals) in timeline.durations_by_issue(now) {
        writeln!(
            writer,
            "  {key} {} {}",
            format_duration(totals.total),
            totals.summary
        )?;
    }
    writeln!(writer, "Sum of activity: {}", format_duration(total))?;
    Ok(())
}
