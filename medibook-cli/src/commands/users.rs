//! Users command - list registered accounts

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use medibook_core::{LoggingService, UserProfile};

use super::get_context;
use crate::output;

pub fn run(json: bool, logger: &Option<Arc<LoggingService>>) -> Result<()> {
    let ctx = get_context(logger)?;
    let result = ctx
        .auth_service
        .list_users()
        .map(|users| users.iter().map(|u| u.profile()).collect::<Vec<UserProfile>>());

    output::finish(result, json, |users| {
        if users.is_empty() {
            println!("No registered users.");
            return;
        }

        println!("{}", "Registered Users".bold());
        let mut table = output::create_table();
        table.set_header(vec!["Name", "Email", "Phone", "Date of birth", "Registered"]);
        for user in users {
            let registered = user
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            table.add_row(vec![
                user.full_name(),
                user.email.clone(),
                user.phone.clone(),
                user.dob.clone(),
                registered,
            ]);
        }
        println!("{}", table);
    })
}
