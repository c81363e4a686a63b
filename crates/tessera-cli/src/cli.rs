//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::account::AccountCommand;

/// Session CLI for a remote accounts API.
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version = env!("TESSERA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Accounts API base URL
    #[arg(long, global = true, default_value = "http://localhost:8000")]
    pub api: String,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Account and session operations
    Account(AccountCommand),
}
