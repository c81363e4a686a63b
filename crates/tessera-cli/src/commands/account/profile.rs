//! Profile command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use tessera_core::Error;

use crate::context;
use crate::output;

use super::whoami::print_identity;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: ProfileArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    eprintln!("{}", "Fetching profile...".dimmed());

    let identity = match manager.profile().await {
        Ok(identity) => identity,
        Err(Error::SessionExpired) => {
            bail!("Session expired. Run 'tessera account login' again.")
        }
        Err(err) => return Err(err).context("Failed to fetch profile"),
    };

    if args.json {
        output::json_pretty(&identity)?;
    } else {
        print_identity(&identity);
    }

    Ok(())
}
