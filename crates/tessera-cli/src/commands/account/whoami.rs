//! Whoami command implementation.
//!
//! Reads the locally cached identity; it never talks to the server.
//! Use `tessera account profile` for a fresh copy.

use anyhow::{Context, Result};
use clap::Args;

use tessera_core::Identity;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: WhoamiArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    let identity = manager
        .current_identity()
        .context("Failed to load session")?
        .context("No active session. Run 'tessera account login' first.")?;

    if args.json {
        output::json_pretty(&identity)?;
    } else {
        print_identity(&identity);
    }

    Ok(())
}

pub(super) fn print_identity(identity: &Identity) {
    output::field("ID", &identity.id.to_string());
    output::field("Username", &identity.username);
    output::field("Email", &identity.email);
    if let Some(name) = full_name(identity) {
        output::field("Name", &name);
    }
    if let Some(joined) = &identity.date_joined {
        output::field("Joined", &joined.format("%Y-%m-%d %H:%M UTC").to_string());
    }
}

fn full_name(identity: &Identity) -> Option<String> {
    let first = identity.first_name.as_deref().unwrap_or("");
    let last = identity.last_name.as_deref().unwrap_or("");
    let name = format!("{first} {last}");
    let name = name.trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
