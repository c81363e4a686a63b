//! Logout command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    manager.logout().await.context("Failed to logout")?;

    output::success("Logged out");

    Ok(())
}
