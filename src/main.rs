//! Quire CLI - content runtime for small sites
//!
//! Usage: quire <COMMAND>
//!
//! Commands:
//!   sync       Mirror every configured source once
//!   watch      Mirror and keep mirroring until Ctrl+C
//!   pages      List the mirrored pages
//!   integrity  Print a static file's integrity digest
//!   sprites    Build a spritesheet
//!   icon       Resolve an icon request
//!   site       Show title, logo, navigation and icons

use std::process::ExitCode;

use clap::Parser;
use quire::QuireError;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = quire::logging::init(cli.verbose) {
        eprintln!("warning: logging disabled: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = commands::load_config(cli.config.as_deref(), cli.json)?;

    match cli.command {
        Commands::Sync => commands::sync::cmd_sync(&config, cli.json),
        Commands::Watch => commands::watch::cmd_watch(&config, cli.json),
        Commands::Pages { drafts, featured } => {
            commands::pages::cmd_pages(&config, drafts, featured, cli.json)
        }
        Commands::Integrity { path } => commands::assets::cmd_integrity(&config, &path, cli.json),
        Commands::Sprites { sources } => commands::assets::cmd_sprites(&config, &sources, cli.json),
        Commands::Icon { name, output } => {
            commands::icon::cmd_icon(&config, &name, output.as_deref(), cli.json)
        }
        Commands::Site => commands::site::cmd_site(&config, cli.json),
    }
}

fn report(err: &anyhow::Error) {
    eprintln!("Error: {err:#}");
    if let Some(hint) = err.downcast_ref::<QuireError>().and_then(QuireError::hint) {
        eprintln!();
        eprintln!("Hint: {hint}");
    }
}
