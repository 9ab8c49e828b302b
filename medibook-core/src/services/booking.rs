//! Booking service - append-only appointment capture

use std::sync::Arc;

use chrono::Utc;

use crate::domain::result::Result;
use crate::domain::{Appointment, AppointmentStatus, BookingRequest};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};
use crate::services::StorageRepository;

/// Booking service
///
/// There is no availability model, no overlap detection and no way to
/// cancel: every valid request becomes one more upcoming appointment.
pub struct BookingService {
    repository: Arc<StorageRepository>,
    logger: Option<Arc<LoggingService>>,
}

impl BookingService {
    pub fn new(repository: Arc<StorageRepository>, logger: Option<Arc<LoggingService>>) -> Self {
        Self { repository, logger }
    }

    /// Validate and store one appointment
    pub fn book(&self, request: BookingRequest) -> Result<Appointment> {
        let appointment = request.into_appointment(Utc::now())?;
        let stored = self.repository.append_appointment(appointment)?;

        log_quietly(
            self.logger.as_deref(),
            LogEvent::new("appointment_booked").with_subject(stored.doctor.as_str()),
        );
        Ok(stored)
    }

    /// All appointments in booking order
    pub fn list(&self) -> Result<Vec<Appointment>> {
        self.repository.appointments()
    }

    /// Appointments still marked upcoming
    pub fn upcoming(&self) -> Result<Vec<Appointment>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|a| a.status == AppointmentStatus::Upcoming)
            .collect())
    }
}
