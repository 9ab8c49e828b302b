//! MediBook CLI - accounts and appointments in your terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{appointments, auth, logs, settings, signup, users};
use medibook_core::services::logging::log_quietly;
use medibook_core::LogEvent;

/// MediBook - accounts and appointments in your terminal
#[derive(Parser)]
#[command(name = "medibook", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account, confirmed with a one-time code
    Signup(signup::SignupArgs),

    /// Log in with email and password
    Login {
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Password
        #[arg(long)]
        password: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Log out the active user
    Logout,

    /// Show the active user
    Whoami {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List registered users
    Users {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Book an appointment
    Book {
        /// Doctor name
        #[arg(long)]
        doctor: String,
        /// Date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
        /// Time (HH:MM)
        #[arg(long)]
        time: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List booked appointments
    Appointments {
        /// Only show upcoming appointments
        #[arg(long)]
        upcoming: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or update settings
    Settings(settings::SettingsArgs),

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Signup(_) => "signup",
            Commands::Login { .. } => "login",
            Commands::Logout => "logout",
            Commands::Whoami { .. } => "whoami",
            Commands::Users { .. } => "users",
            Commands::Book { .. } => "book",
            Commands::Appointments { .. } => "appointments",
            Commands::Settings(_) => "settings",
            Commands::Logs { .. } => "logs",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let logger = commands::get_logger();
    log_quietly(
        logger.as_deref(),
        LogEvent::new("command_executed").with_command(cli.command.name()),
    );

    match cli.command {
        Commands::Signup(args) => signup::run(args, &logger),
        Commands::Login {
            email,
            password,
            json,
        } => auth::run_login(email, password, json, &logger),
        Commands::Logout => auth::run_logout(&logger),
        Commands::Whoami { json } => auth::run_whoami(json, &logger),
        Commands::Users { json } => users::run(json, &logger),
        Commands::Book {
            doctor,
            date,
            time,
            json,
        } => appointments::run_book(doctor, date, time, json, &logger),
        Commands::Appointments { upcoming, json } => {
            appointments::run_list(upcoming, json, &logger)
        }
        Commands::Settings(args) => settings::run(args),
        Commands::Logs { command } => logs::run(command, &logger),
    }
}
