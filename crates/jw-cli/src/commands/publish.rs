//! Publish command: submits the timeline as worklog entries.

use std::io::Write;

use anyhow::Result;

use jw_core::{IssueTracker, Publisher, Store};

pub fn run<W: Write, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    store: &S,
    tracker: &T,
) -> Result<()> {
    let report = Publisher::new(store, tracker).publish()?;
    writeln!(
        writer,
        "Worklog sent: {} submitted, {} skipped",
        report.submitted, report.skipped
    )?;
    Ok(())
}
