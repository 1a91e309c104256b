//! Status command: the current session and its activity.

use std::io::Write;

use anyhow::Result;
use chrono::{TimeDelta, Utc};

use jw_core::{ConfigStore, IssueTracker, SessionMachine, Store};

use super::util::format_duration;

pub fn run<W: Write, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    store: &S,
    tracker: &T,
) -> Result<()> {
    let config = ConfigStore::new(store).load()?;
    let machine = SessionMachine::new(store, tracker, config);
    let session = machine.current()?;
    let now = Utc::now();

    if session.is_finished() {
        let idle = session
            .finish_time
            .map_or_else(TimeDelta::zero, |finish| now - finish);
        writeln!(
            writer,
            "Last session: {} {}",
            session.issue.key, session.issue.summary
        )?;
        writeln!(writer, "Doing nothing for {}", format_duration(idle))?;
    } else {
        writeln!(
            writer,
            "Current session: {} {}",
            session.issue.key, session.issue.summary
        )?;
        writeln!(
            writer,
            "Activity: {}",
            format_duration(session.activity_duration(now))
        )?;
    }
    Ok(())
}
