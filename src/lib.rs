//! shifttrack library root.
//! Exposes the CLI parser, the high-level run() function, and the
//! internal modules (tracking core, geolocation capability, store, UI).

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod export;
pub mod geo;
pub mod models;
pub mod store;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cli),
        Commands::Login { .. } => cli::commands::login::handle(&cli.command, cfg),
        Commands::Checkin { .. } => cli::commands::checkin::handle(&cli.command, cfg),
        Commands::Track { .. } => cli::commands::track::handle(&cli.command, cfg),
        Commands::History { .. } => cli::commands::history::handle(&cli.command),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1. parse CLI
    let cli = Cli::parse();

    // 2. load config once, honoring the --config override
    let cfg = Config::load_or_default(cli.config.as_deref());

    // 3. hand everything to the dispatcher
    dispatch(&cli, &cfg)
}
