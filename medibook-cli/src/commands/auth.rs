//! Login, logout and whoami commands

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Password};

use medibook_core::{LoggingService, UserProfile};

use super::get_context;
use crate::output;

pub fn run_login(
    email: Option<String>,
    password: Option<String>,
    json: bool,
    logger: &Option<Arc<LoggingService>>,
) -> Result<()> {
    let ctx = get_context(logger)?;
    let mut session = ctx.restore_session()?;

    let email = match email {
        Some(e) => e,
        None if json => String::new(),
        None => Input::new()
            .with_prompt("Email")
            .allow_empty(true)
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None if json => String::new(),
        None => Password::new()
            .with_prompt("Password")
            .allow_empty_password(true)
            .interact()?,
    };

    let result = output::with_latency(ctx.config.simulated_latency(), "Signing in...", || {
        ctx.auth_service
            .login(&mut session, &email, &password)
            .map(|user| user.profile())
    });

    output::finish(result, json, |profile| {
        output::success("Welcome back!");
        println!("Hello, {}", profile.first_name);
    })
}

pub fn run_logout(logger: &Option<Arc<LoggingService>>) -> Result<()> {
    let ctx = get_context(logger)?;
    let mut session = ctx.restore_session()?;

    if ctx.auth_service.logout(&mut session)?.is_none() {
        println!("{}", "Nobody is logged in".dimmed());
        return Ok(());
    }
    output::success("Logged out");
    Ok(())
}

pub fn run_whoami(json: bool, logger: &Option<Arc<LoggingService>>) -> Result<()> {
    let ctx = get_context(logger)?;
    let session = ctx.restore_session()?;
    let greeting = session.greeting();
    let profile: Option<UserProfile> = session.current_user.as_ref().map(|u| u.profile());

    output::finish(Ok(profile), json, |profile| match profile {
        None => output::info("Not logged in"),
        Some(p) => {
            if let Some(greeting) = &greeting {
                println!("{}", greeting.bold());
                println!();
            }
            let mut table = output::create_table();
            table.add_row(vec!["Name", &p.full_name()]);
            table.add_row(vec!["Email", &p.email]);
            table.add_row(vec!["Phone", &p.phone]);
            table.add_row(vec!["Date of birth", &p.dob]);
            println!("{}", table);
        }
    })
}
