//! Signup command - register an account confirmed by a one-time code

use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use dialoguer::{Input, Password};

use medibook_core::{LoggingService, OneTimeCode, SignupForm, Verification};

use super::get_context;
use crate::output;

/// Typed at the code prompt to get a fresh code
const RESEND_KEYWORD: &str = "resend";

#[derive(Args)]
pub struct SignupArgs {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,
    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,
    /// Email address
    #[arg(long)]
    pub email: Option<String>,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<String>,
    /// Password (prompted twice when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

fn prompt_text(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::new()
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

fn collect_form(args: SignupArgs) -> Result<SignupForm> {
    let first_name = prompt_text(args.first_name, "First name")?;
    let last_name = prompt_text(args.last_name, "Last name")?;
    let email = prompt_text(args.email, "Email")?;
    let phone = prompt_text(args.phone, "Phone")?;
    let dob = prompt_text(args.dob, "Date of birth (YYYY-MM-DD)")?;

    let (password, confirm_password) = match args.password {
        Some(p) => (p.clone(), p),
        None => (prompt_password("Password")?, prompt_password("Confirm password")?),
    };

    Ok(SignupForm {
        first_name,
        last_name,
        email,
        phone,
        password,
        confirm_password,
        dob,
    })
}

fn show_code(code: &OneTimeCode) {
    println!();
    println!("Your verification code is {}", code.as_str().bold());
    println!(
        "{}",
        format!("Enter it below, type '{}' for a new one, or leave empty to cancel.", RESEND_KEYWORD)
            .dimmed()
    );
}

pub fn run(args: SignupArgs, logger: &Option<Arc<LoggingService>>) -> Result<()> {
    let ctx = get_context(logger)?;
    let mut session = ctx.restore_session()?;
    let latency = ctx.config.simulated_latency();

    let form = collect_form(args)?;
    let submitted = ctx.signup_service.submit(&mut session, &form);
    let mut code = match submitted {
        Ok(code) => code,
        Err(e) => return output::finish::<()>(Err(e), false, |_| {}),
    };
    show_code(&code);

    loop {
        let entered: String = Input::new()
            .with_prompt("Verification code")
            .allow_empty(true)
            .interact_text()?;
        let entered = entered.trim();

        if entered.is_empty() {
            ctx.signup_service.abandon(&mut session);
            println!("{}", "Signup cancelled".dimmed());
            return Ok(());
        }

        if entered.eq_ignore_ascii_case(RESEND_KEYWORD) {
            code = ctx.signup_service.resend(&mut session)?;
            output::info("A new code has been issued.");
            show_code(&code);
            continue;
        }

        let outcome = output::with_latency(latency, "Verifying...", || {
            ctx.signup_service.verify(&mut session, entered)
        })?;

        match outcome {
            Verification::Accepted(user) => {
                output::success(&format!("Account created. Hello, {}", user.first_name));
                return Ok(());
            }
            Verification::Rejected { .. } => {
                output::error("Invalid OTP. Please try again.");
            }
        }
    }
}
