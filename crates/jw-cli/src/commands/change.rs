//! Change command: stop the current session, start the next one.

use std::io::{BufRead, Write};

use anyhow::Result;

use jw_core::{IssueTracker, Store};

use crate::StartArgs;
use crate::commands::{start, stop};

pub fn run<W: Write, R: BufRead, S: Store + ?Sized, T: IssueTracker + ?Sized>(
    writer: &mut W,
    input: &mut R,
    store: &S,
    tracker: &T,
    args: &StartArgs,
) -> Result<()> {
    stop::run(writer, store, tracker)?;
    start::run(writer, input, store, tracker, args)
}
