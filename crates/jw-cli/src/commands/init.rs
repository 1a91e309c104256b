//! Init command: creates the store, the config document and an empty
//! timeline.

use std::io::Write;

use anyhow::{Context, Result};

use jw_core::{Config, ConfigStore, SessionMachine};
use jw_jira::Factory;
use jw_store::FileStore;

pub fn run<W: Write>(writer: &mut W, store: &FileStore) -> Result<()> {
    store.init().context("could not initialize storage")?;
    ConfigStore::new(store).init()?;

    let tracker = Factory::new(store);
    SessionMachine::new(store, &tracker, Config::default()).init()?;

    writeln!(writer, "Initialized {}", store.dir().display())?;
    Ok(())
}
