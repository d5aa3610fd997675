//! Keepsake CLI - seal secrets into tokens that only your passkey can open
//!
//! This is the command-line interface for Keepsake. Each run is one session:
//! it owns the attempt limiter that counts wrong passkeys.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod fs;
mod helpers;
mod logging;
mod output;

use clap::Parser;
use keepsake_core::VaultError;

use crate::app::AppContext;
use crate::cli::{Cli, Commands};
use crate::commands::{misc, retrieve, store};
use crate::errors::CliError;

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        if let Some(cli_err) = e.downcast_ref::<CliError>() {
            cli_err.exit();
        }
        if let Some(vault_err) = e.downcast_ref::<VaultError>() {
            CliError::from(vault_err.clone()).exit();
        }
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Store(args) => store::handle_store(ctx, args),
        Commands::Retrieve(args) => retrieve::handle_retrieve(ctx, args),
        Commands::Config => misc::handle_config(ctx, cli),
        Commands::Completions(args) => misc::handle_completions(args.shell),
    }
}
