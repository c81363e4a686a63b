//! Update profile command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use tessera_core::ProfileUpdate;

use crate::context;
use crate::output;

use super::whoami::print_identity;

#[derive(Args, Debug)]
pub struct UpdateProfileArgs {
    /// New email address
    #[arg(long)]
    pub email: Option<String>,

    /// New first name
    #[arg(long)]
    pub first_name: Option<String>,

    /// New last name
    #[arg(long)]
    pub last_name: Option<String>,
}

pub async fn run(args: UpdateProfileArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    let update = ProfileUpdate {
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
    };
    if update.is_empty() {
        bail!("Nothing to update. Pass at least one of --email, --first-name, --last-name.");
    }

    eprintln!("{}", "Updating profile...".dimmed());

    let identity = manager
        .update_profile(&update)
        .await
        .context("Failed to update profile")?;

    output::success("Profile updated");
    println!();
    print_identity(&identity);

    Ok(())
}
