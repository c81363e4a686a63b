//! Change password command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tessera_core::PasswordChange;

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct ChangePasswordArgs {
    /// Current password
    #[arg(long)]
    pub old_password: String,

    /// New password
    #[arg(long)]
    pub new_password: String,

    /// New password again, to confirm
    #[arg(long)]
    pub new_password_confirm: String,
}

pub async fn run(args: ChangePasswordArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    let change = PasswordChange::new(
        &args.old_password,
        &args.new_password,
        &args.new_password_confirm,
    );

    eprintln!("{}", "Changing password...".dimmed());

    manager
        .change_password(&change)
        .await
        .context("Failed to change password")?;

    output::success("Password changed");

    Ok(())
}
