//! cryptotoolbox CLI.
//!
//! Thin harness over the wallet and vesting crates.
//!
//! Environment:
//!
//!   CRYPTOTOOLBOX_PASSPHRASE   Wallet passphrase (avoids --passphrase)
//!   RUST_LOG                   Log level filter (default: error)

mod commands;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cryptotoolbox_types::config::ToolboxConfig;
use cryptotoolbox_types::Result;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Demo wallet key material and token vesting.
#[derive(Parser)]
#[command(name = "cryptotoolbox", version, about)]
struct Cli {
    /// Output in JSON format (no colors, machine-readable).
    #[arg(long, global = true)]
    json: bool,

    /// Load defaults from a JSON config file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new wallet and print its exported envelope.
    CreateWallet(commands::wallet::CreateArgs),
    /// Verify an exported envelope file and print the recovered phrase.
    ImportWallet(commands::wallet::ImportArgs),
    /// Derive key material for one account index of a seed phrase.
    Derive(commands::derive::DeriveArgs),
    /// Evaluate a cliff + linear vesting schedule.
    Vesting(commands::vesting::VestingArgs),
}

// ---------------------------------------------------------------------------
// Global options passed to every command handler
// ---------------------------------------------------------------------------

/// Shared options threaded into command handlers.
pub struct GlobalOpts {
    pub json: bool,
    pub config: ToolboxConfig,
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    // Logs go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli) {
        output::print_error(&e.to_string(), json);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ToolboxConfig::load(path)?,
        None => ToolboxConfig::default(),
    };
    tracing::debug!(path = ?cli.config, "configuration resolved");

    let opts = GlobalOpts {
        json: cli.json,
        config,
    };

    match cli.command {
        Commands::CreateWallet(args) => commands::wallet::create(args, &opts),
        Commands::ImportWallet(args) => commands::wallet::import(args, &opts),
        Commands::Derive(args) => commands::derive::run(args, &opts),
        Commands::Vesting(args) => commands::vesting::run(args, &opts),
    }
}
