//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use tessera_core::{Registration, RegistrationForm};

use crate::context;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username for the new account
    #[arg(long)]
    pub username: String,

    /// Email address for the new account
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Password again, to confirm
    #[arg(long)]
    pub password_confirm: String,

    /// First name (optional)
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name (optional)
    #[arg(long)]
    pub last_name: Option<String>,
}

pub async fn run(args: RegisterArgs, api: &str) -> Result<()> {
    let manager = context::build_manager(api)?;

    let mut form = RegistrationForm::new(
        &args.username,
        &args.email,
        &args.password,
        &args.password_confirm,
    );
    if let Some(first_name) = &args.first_name {
        form = form.with_first_name(first_name);
    }
    if let Some(last_name) = &args.last_name {
        form = form.with_last_name(last_name);
    }

    eprintln!("{}", "Registering...".dimmed());

    let registration = manager.register(&form).await.context("Failed to register")?;

    match registration {
        Registration::Active(session) => {
            output::success("Account created and logged in");
            println!();
            output::field("Username", &session.identity.username);
            output::field("Email", &session.identity.email);
        }
        Registration::PendingVerification { identity, message } => {
            output::success("Account created");
            println!();
            output::field("Username", &identity.username);
            output::field("Email", &identity.email);
            println!();
            match message {
                Some(message) => println!("{}", message),
                None => println!("Verify the account before logging in."),
            }
        }
    }

    Ok(())
}
