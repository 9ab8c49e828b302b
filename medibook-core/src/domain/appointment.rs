//! Appointment domain model

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::result::{Error, FieldError, Result};

/// Date format accepted for bookings
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format accepted for bookings
pub const TIME_FORMAT: &str = "%H:%M";

/// Appointment lifecycle status
///
/// Bookings are append-only, so `upcoming` is the only status ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Upcoming,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Upcoming => "upcoming",
        }
    }
}

/// A booked appointment as stored under `medibook_appointments`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Creation time in unix milliseconds
    pub id: i64,
    /// Free-text doctor label
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub status: AppointmentStatus,
}

/// Booking form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingRequest {
    pub doctor: String,
    pub date: String,
    pub time: String,
}

impl BookingRequest {
    pub fn new(doctor: impl Into<String>, date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            doctor: doctor.into(),
            date: date.into(),
            time: time.into(),
        }
    }

    /// Validate the request and build an upcoming appointment
    pub fn into_appointment(self, created_at: DateTime<Utc>) -> Result<Appointment> {
        let doctor = self.doctor.trim();
        let date = self.date.trim();
        let time = self.time.trim();

        let mut errors = Vec::new();
        if doctor.is_empty() {
            errors.push(FieldError::new("doctor", "Please choose a doctor"));
        }
        if date.is_empty() {
            errors.push(FieldError::new("date", "Please select a date"));
        } else if NaiveDate::parse_from_str(date, DATE_FORMAT).is_err() {
            errors.push(FieldError::new("date", "Date must be YYYY-MM-DD"));
        }
        if time.is_empty() {
            errors.push(FieldError::new("time", "Please select a time"));
        } else if NaiveTime::parse_from_str(time, TIME_FORMAT).is_err() {
            errors.push(FieldError::new("time", "Time must be HH:MM"));
        }
        if !errors.is_empty() {
            return Err(Error::InvalidFields(errors));
        }

        Ok(Appointment {
            id: created_at.timestamp_millis(),
            doctor: doctor.to_string(),
            date: date.to_string(),
            time: time.to_string(),
            status: AppointmentStatus::Upcoming,
        })
    }
}
