//! Book and appointments commands

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use medibook_core::{BookingRequest, LoggingService};

use super::get_context;
use crate::output;

fn prompt_missing(value: Option<String>, prompt: &str, json: bool) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        // Missing values are left empty so validation reports them
        None if json => Ok(String::new()),
        None => Ok(Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?),
    }
}

pub fn run_book(
    doctor: String,
    date: Option<String>,
    time: Option<String>,
    json: bool,
    logger: &Option<Arc<LoggingService>>,
) -> Result<()> {
    let ctx = get_context(logger)?;

    let date = prompt_missing(date, "Date (YYYY-MM-DD)", json)?;
    let time = prompt_missing(time, "Time (HH:MM)", json)?;
    let request = BookingRequest::new(doctor, date, time);

    let result = output::with_latency(ctx.config.simulated_latency(), "Booking...", || {
        ctx.booking_service.book(request)
    });

    output::finish(result, json, |appointment| {
        output::success("Appointment booked");
        println!("  Doctor: {}", appointment.doctor);
        println!("  When: {} at {}", appointment.date, appointment.time);
        println!("  Status: {}", appointment.status.as_str());
    })
}

pub fn run_list(upcoming_only: bool, json: bool, logger: &Option<Arc<LoggingService>>) -> Result<()> {
    let ctx = get_context(logger)?;
    let result = if upcoming_only {
        ctx.booking_service.upcoming()
    } else {
        ctx.booking_service.list()
    };

    output::finish(result, json, |appointments| {
        if appointments.is_empty() {
            println!("No appointments booked.");
            return;
        }

        println!("{}", "Appointments".bold());
        let mut table = output::create_table();
        table.set_header(vec!["ID", "Doctor", "Date", "Time", "Status"]);
        for appt in appointments {
            table.add_row(vec![
                appt.id.to_string(),
                appt.doctor.clone(),
                appt.date.clone(),
                appt.time.clone(),
                appt.status.as_str().to_string(),
            ]);
        }
        println!("{}", table);
    })
}
