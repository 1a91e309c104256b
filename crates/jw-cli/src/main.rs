use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use jw_cli::commands::{change, config, edit, init, login, publish, show, start, status, stop};
use jw_cli::{Cli, Commands, Settings};
use jw_jira::Factory;
use jw_store::FileStore;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let settings = Settings::load().context("failed to load settings")?;
    tracing::debug!(?settings, "loaded settings");

    let store = FileStore::new(settings.data_dir.clone());
    let tracker = Factory::new(&store);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match &cli.command {
        Commands::Init => init::run(&mut out, &store),
        Commands::Login { url } => login::run(&mut out, &mut input, &store, url),
        Commands::Start(args) => start::run(&mut out, &mut input, &store, &tracker, args),
        Commands::Stop => stop::run(&mut out, &store, &tracker),
        Commands::Change(args) => change::run(&mut out, &mut input, &store, &tracker, args),
        Commands::Status => status::run(&mut out, &store, &tracker),
        Commands::Show => show::run(&mut out, &store, &tracker),
        Commands::Edit(args) => edit::run(&mut out, &store, &tracker, args),
        Commands::Publish => publish::run(&mut out, &store, &tracker),
        Commands::Config(args) => config::run(&mut out, &store, args),
    }
}
