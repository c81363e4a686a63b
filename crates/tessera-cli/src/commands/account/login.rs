//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tessera_core::Credentials;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username to authenticate with
    #[arg(long)]
    pub username: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;
    let credentials = Credentials::new(&args.username, &args.password);

    eprintln!("{}", "Logging in...".dimmed());

    let session = manager
        .login(&credentials)
        .await
        .context("Failed to login")?;

    output::success("Logged in successfully");
    println!();
    output::field("Username", &session.identity.username);
    output::field("Email", &session.identity.email);

    Ok(())
}
