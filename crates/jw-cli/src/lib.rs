//! Worklog console CLI library.
//!
//! This crate provides the CLI interface for the worklog console.

mod cli;
pub mod commands;
mod settings;

pub use cli::{Cli, Commands, ConfigArgs, EditArgs, StartArgs};
pub use settings::Settings;
