//! Config command: list or change the tracked-work configuration.

use std::io::Write;

use anyhow::{Context, Result};

use jw_core::{ConfigStore, Store};

use crate::ConfigArgs;

pub fn run<W: Write, S: Store + ?Sized>(
    writer: &mut W,
    store: &S,
    args: &ConfigArgs,
) -> Result<()> {
    let config_store = ConfigStore::new(store);

    if let Some(assignment) = &args.set {
        let (key, value) = assignment
            .split_once(':')
            .context("use ':' to separate key and value")?;
        let mut config = config_store.load()?;
        config.set(key.trim(), value.trim())?;
        config_store.save(&config)?;
        return Ok(());
    }

    let config = config_store.load()?;
    for (key, value) in config.entries() {
        writeln!(writer, "{key:>20} | '{value}'")?;
    }
    Ok(())
}
