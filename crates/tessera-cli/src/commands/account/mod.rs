//! Account subcommand implementations.

mod change_password;
mod delete_account;
mod login;
mod logout;
mod profile;
mod register;
mod update_profile;
mod whoami;

use anyhow::Result;
use clap::{Args, Subcommand};

#[derive(Args, Debug)]
pub struct AccountCommand {
    #[command(subcommand)]
    pub command: AccountSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AccountSubcommand {
    /// Log in and establish a session
    Login(login::LoginArgs),

    /// Register a new account
    Register(register::RegisterArgs),

    /// Log out and clear the session
    Logout(logout::LogoutArgs),

    /// Display the locally cached identity
    Whoami(whoami::WhoamiArgs),

    /// Fetch the profile from the server
    Profile(profile::ProfileArgs),

    /// Update profile fields
    UpdateProfile(update_profile::UpdateProfileArgs),

    /// Change the account password
    ChangePassword(change_password::ChangePasswordArgs),

    /// Delete the account permanently
    DeleteAccount(delete_account::DeleteAccountArgs),
}

pub async fn handle(cmd: AccountCommand, api: &str) -> Result<()> {
    match cmd.command {
        AccountSubcommand::Login(args) => login::run(args, api).await,
        AccountSubcommand::Register(args) => register::run(args, api).await,
        AccountSubcommand::Logout(args) => logout::run(args, api).await,
        AccountSubcommand::Whoami(args) => whoami::run(args, api).await,
        AccountSubcommand::Profile(args) => profile::run(args, api).await,
        AccountSubcommand::UpdateProfile(args) => update_profile::run(args, api).await,
        AccountSubcommand::ChangePassword(args) => change_password::run(args, api).await,
        AccountSubcommand::DeleteAccount(args) => delete_account::run(args, api).await,
    }
}
