//! Stop command: finishes the current session.

use std::io::Write;

use anyhow::Result;

use jw_core::{ConfigStore, IssueTracker, SessionMachine, Store};

use super::util::format_duration;

pub fn run<W: Write, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    store: &S,
    tracker: &T,
) -> Result<()> {
    let config = ConfigStore::new(store).load()?;
    let machine = SessionMachine::new(store, tracker, config);
    let session = machine.stop()?;

    writeln!(
        writer,
        "Stopped {} {} after {}",
        session.issue.key,
        session.issue.summary,
        format_duration(session.duration())
    )?;
    Ok(())
}
