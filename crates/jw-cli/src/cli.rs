//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

/// Jira worklog console.
///
/// Tracks work sessions against Jira issues locally and publishes them
/// later as worklog entries.
#[derive(Debug, Parser)]
#[command(name = "jw", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Initialize the local store and an empty timeline.
    Init,

    /// Log in to a Jira instance and store the credentials.
    Login {
        /// Base URL of the Jira instance.
        url: String,
    },

    /// Start tracking a session against an issue.
    Start(StartArgs),

    /// Stop the current session.
    Stop,

    /// Stop the current session and start the next one.
    Change(StartArgs),

    /// Show the current session and its activity.
    Status,

    /// Show the tracked timeline.
    #[command(visible_aliases = ["log", "ps"])]
    Show,

    /// Edit one timeline record.
    Edit(EditArgs),

    /// Submit tracked sessions as worklog entries.
    #[command(visible_alias = "push")]
    Publish,

    /// List or change configuration values.
    Config(ConfigArgs),
}

/// Options shared by `start` and `change`.
#[derive(Debug, Args)]
pub struct StartArgs {
    /// Issue key or id.
    pub issue: String,

    /// One-line description.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Reuse the most recent description used for this issue.
    #[arg(short, long)]
    pub prev_description: bool,

    /// Tag for the session.
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Start without a tag.
    #[arg(short, long)]
    pub no_tag: bool,
}

/// Options for `edit`.
#[derive(Debug, Args)]
pub struct EditArgs {
    /// Record number as shown by `jw show`.
    pub index: usize,

    /// New one-line description.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Clear the description.
    #[arg(long)]
    pub clear_message: bool,

    /// New start time, local wall clock, `YYYY-MM-DDTHH:MM`.
    #[arg(long)]
    pub start_time: Option<String>,

    /// New finish time, local wall clock, `YYYY-MM-DDTHH:MM`.
    #[arg(long)]
    pub finish_time: Option<String>,

    /// Move the record to another issue.
    #[arg(long)]
    pub ticket: Option<String>,
}

/// Options for `config`.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// List configuration values.
    #[arg(short, long)]
    pub list: bool,

    /// Set one value as `key:value`; list values are comma-separated.
    #[arg(long)]
    pub set: Option<String>,
}
