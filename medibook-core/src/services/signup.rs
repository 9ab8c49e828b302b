//! Signup service - drives the signup flow and persists verified accounts

use std::sync::Arc;

use rand::Rng;

use crate::domain::result::Result;
use crate::domain::{OneTimeCode, Session, SignupForm, SignupRules, Verification};
use crate::services::logging::{log_quietly, LogEvent, LoggingService};
use crate::services::StorageRepository;

/// Signup service
///
/// The issued code is returned to the caller to display; there is no
/// out-of-band delivery channel.
pub struct SignupService {
    repository: Arc<StorageRepository>,
    rules: SignupRules,
    logger: Option<Arc<LoggingService>>,
}

impl SignupService {
    pub fn new(
        repository: Arc<StorageRepository>,
        rules: SignupRules,
        logger: Option<Arc<LoggingService>>,
    ) -> Self {
        Self {
            repository,
            rules,
            logger,
        }
    }

    /// Validate the form and issue a code
    pub fn submit(&self, session: &mut Session, form: &SignupForm) -> Result<OneTimeCode> {
        self.submit_with_rng(session, form, &mut rand::thread_rng())
    }

    pub fn submit_with_rng<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        form: &SignupForm,
        rng: &mut R,
    ) -> Result<OneTimeCode> {
        let code = session.signup.submit(form, &self.rules, rng)?;
        log_quietly(
            self.logger.as_deref(),
            LogEvent::new("signup_code_issued").with_subject(form.email.trim()),
        );
        Ok(code)
    }

    /// Check an entered code; on a match the account is stored and the
    /// session logged in
    ///
    /// The overwrite of the active user goes first and the append last, so a
    /// failed finalize retried with the same code never lists the user twice.
    pub fn verify(&self, session: &mut Session, entered: &str) -> Result<Verification> {
        let repository = &self.repository;
        let outcome = session.signup.verify(entered, |user| {
            repository.set_current_user(user)?;
            repository.append_user(user).map(|_| ())
        })?;

        match &outcome {
            Verification::Accepted(user) => {
                session.current_user = Some(user.clone());
                log_quietly(
                    self.logger.as_deref(),
                    LogEvent::new("signup_verified").with_subject(user.email.as_str()),
                );
            }
            Verification::Rejected { attempts } => {
                log_quietly(
                    self.logger.as_deref(),
                    LogEvent::new("signup_code_rejected")
                        .with_error(format!("attempt {}", attempts)),
                );
            }
        }

        Ok(outcome)
    }

    /// Replace the outstanding code
    pub fn resend(&self, session: &mut Session) -> Result<OneTimeCode> {
        self.resend_with_rng(session, &mut rand::thread_rng())
    }

    pub fn resend_with_rng<R: Rng + ?Sized>(
        &self,
        session: &mut Session,
        rng: &mut R,
    ) -> Result<OneTimeCode> {
        let code = session.signup.resend(rng)?;
        log_quietly(self.logger.as_deref(), LogEvent::new("signup_code_resent"));
        Ok(code)
    }

    /// Give up on the pending signup
    pub fn abandon(&self, session: &mut Session) {
        if session.signup.pending().is_some() {
            log_quietly(self.logger.as_deref(), LogEvent::new("signup_abandoned"));
        }
        session.signup.abandon();
    }
}
