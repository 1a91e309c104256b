//! Edit command: patches one timeline record.

use std::io::Write;

use anyhow::{Result, bail};

use jw_core::{ConfigStore, EditPatch, IssueTracker, Patch, SessionMachine, Store};

use crate::EditArgs;
use super::util::parse_local_datetime;

pub fn run<W: Write, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    store: &S,
    tracker: &T,
    args: &EditArgs,
) -> Result<()> {
    if args.message.is_some() && args.clear_message {
        bail!("use either --message or --clear-message, not both");
    }

    let mut patch = EditPatch::default();
    if let Some(message) = &args.message {
        patch.description = Patch::Set(message.clone());
    }
    if args.clear_message {
        patch.description = Patch::Set(String::new());
    }
    if let Some(start) = &args.start_time {
        patch.start_time = Patch::Set(parse_local_datetime(start)?);
    }
    if let Some(finish) = &args.finish_time {
        patch.finish_time = Patch::Set(parse_local_datetime(finish)?);
    }
    if let Some(ticket) = &args.ticket {
        patch.issue = Patch::Set(ticket.clone());
    }

    let config = ConfigStore::new(store).load()?;
    let machine = SessionMachine::new(store, tracker, config);
    let session = machine.edit(args.index, &patch)?;

    writeln!(
        writer,
        "Edited record {}: {} {}",
        args.index, session.issue.key, session.issue.summary
    )?;
    Ok(())
}
