//! Delete account command implementation.
//!
//! Deletion is permanent on the server side. The command prompts for
//! confirmation unless --force is given.

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct DeleteAccountArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub async fn run(args: DeleteAccountArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    // Confirm unless --force
    if !args.force {
        eprint!("This will permanently delete the account. Continue? [y/N] ");
        io::stderr().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    manager
        .delete_account()
        .await
        .context("Failed to delete account")?;

    output::success("Account deleted");

    Ok(())
}
