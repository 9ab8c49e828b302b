//! Signup form validation and the one-time-code verification flow

use std::sync::OnceLock;

use chrono::Utc;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::otp::OneTimeCode;
use super::result::{Error, FieldError, Result};
use super::user::User;

/// Default minimum password length
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Default minimum number of digits in a phone number
pub const DEFAULT_MIN_PHONE_DIGITS: usize = 10;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").unwrap())
}

/// Thresholds applied to a signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRules {
    pub min_password_length: usize,
    pub min_phone_digits: usize,
}

impl Default for SignupRules {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            min_phone_digits: DEFAULT_MIN_PHONE_DIGITS,
        }
    }
}

/// Raw signup form input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub dob: String,
}

impl SignupForm {
    /// Validate the form and build the pending user record
    ///
    /// Every field is trimmed except `dob`, which is only checked for
    /// presence. All failing fields are reported, at most one message each.
    pub fn validate(&self, rules: &SignupRules) -> Result<User> {
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let password = self.password.trim();
        let confirm_password = self.confirm_password.trim();

        let mut errors = Vec::new();

        let required = [
            ("firstName", first_name, "First name is required"),
            ("lastName", last_name, "Last name is required"),
            ("email", email, "Email is required"),
            ("phone", phone, "Phone number is required"),
            ("password", password, "Password is required"),
            ("confirmPassword", confirm_password, "Please confirm your password"),
            ("dob", self.dob.as_str(), "Date of birth is required"),
        ];
        for (field, value, message) in required {
            if value.is_empty() {
                errors.push(FieldError::new(field, message));
            }
        }

        let missing = |field: &str| errors.iter().any(|e: &FieldError| e.field == field);

        let mut shape_errors = Vec::new();
        if !missing("email") && !email_regex().is_match(email) {
            shape_errors.push(FieldError::new("email", "Enter a valid email address"));
        }
        if !missing("phone") && phone.chars().filter(char::is_ascii_digit).count() < rules.min_phone_digits {
            shape_errors.push(FieldError::new(
                "phone",
                format!("Phone number needs at least {} digits", rules.min_phone_digits),
            ));
        }
        if !missing("password") && password.chars().count() < rules.min_password_length {
            shape_errors.push(FieldError::new(
                "password",
                format!("Password must be at least {} characters", rules.min_password_length),
            ));
        }
        if !missing("password") && !missing("confirmPassword") && password != confirm_password {
            shape_errors.push(FieldError::new("confirmPassword", "Passwords do not match"));
        }
        errors.extend(shape_errors);

        if !errors.is_empty() {
            return Err(Error::InvalidFields(errors));
        }

        Ok(User {
            email: email.to_string(),
            password: password.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            phone: phone.to_string(),
            dob: self.dob.clone(),
            created_at: Some(Utc::now()),
        })
    }
}

/// Signup data waiting for code confirmation
#[derive(Debug, Clone)]
pub struct PendingSignup {
    pub user: User,
    code: OneTimeCode,
    attempts: u32,
}

impl PendingSignup {
    pub fn code(&self) -> &OneTimeCode {
        &self.code
    }

    /// Rejected entries since the current code was issued
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[derive(Debug, Default)]
enum SignupState {
    #[default]
    Idle,
    CodeIssued(PendingSignup),
    Verified,
}

/// Observable stage of a signup flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SignupStage {
    Idle,
    CodeIssued,
    Verified,
}

/// Outcome of a code entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Code matched, the user was finalized
    Accepted(User),
    /// Code did not match; the same code stays issued
    Rejected { attempts: u32 },
}

/// Signup state machine
///
/// `Idle -> FieldsEntered -> CodeIssued -> Verified`, with a
/// `CodeIssued -> Rejected -> CodeIssued` retry loop. `FieldsEntered` and
/// `Rejected` are passed through within a single call and never observed.
/// There is no retry limit and no expiry.
#[derive(Debug, Default)]
pub struct SignupFlow {
    state: SignupState,
}

impl SignupFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> SignupStage {
        match self.state {
            SignupState::Idle => SignupStage::Idle,
            SignupState::CodeIssued(_) => SignupStage::CodeIssued,
            SignupState::Verified => SignupStage::Verified,
        }
    }

    pub fn pending(&self) -> Option<&PendingSignup> {
        match &self.state {
            SignupState::CodeIssued(pending) => Some(pending),
            _ => None,
        }
    }

    /// Validate the form and issue a code
    ///
    /// On failure the flow keeps its current state. Submitting again while a
    /// code is outstanding replaces both the pending data and the code.
    pub fn submit<R: Rng + ?Sized>(
        &mut self,
        form: &SignupForm,
        rules: &SignupRules,
        rng: &mut R,
    ) -> Result<OneTimeCode> {
        let user = form.validate(rules)?;
        let code = OneTimeCode::generate(rng);
        self.state = SignupState::CodeIssued(PendingSignup {
            user,
            code: code.clone(),
            attempts: 0,
        });
        Ok(code)
    }

    /// Check an entered code
    ///
    /// On a match `finalize` is called with the pending user; only if it
    /// succeeds does the flow move to `Verified`. A failing `finalize`
    /// leaves the code issued so the entry can be retried.
    pub fn verify<F>(&mut self, entered: &str, finalize: F) -> Result<Verification>
    where
        F: FnOnce(&User) -> Result<()>,
    {
        if !matches!(self.state, SignupState::CodeIssued(_)) {
            return Err(Error::invalid_state("No verification code has been issued"));
        }
        if entered.trim().is_empty() {
            return Err(Error::validation("Please enter OTP"));
        }

        let SignupState::CodeIssued(mut pending) = std::mem::take(&mut self.state) else {
            return Err(Error::invalid_state("No verification code has been issued"));
        };

        if !pending.code.matches(entered) {
            pending.attempts += 1;
            let attempts = pending.attempts;
            self.state = SignupState::CodeIssued(pending);
            return Ok(Verification::Rejected { attempts });
        }

        if let Err(e) = finalize(&pending.user) {
            self.state = SignupState::CodeIssued(pending);
            return Err(e);
        }

        self.state = SignupState::Verified;
        Ok(Verification::Accepted(pending.user))
    }

    /// Replace the outstanding code with a fresh one
    pub fn resend<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<OneTimeCode> {
        match &mut self.state {
            SignupState::CodeIssued(pending) => {
                pending.code = OneTimeCode::generate(rng);
                pending.attempts = 0;
                Ok(pending.code.clone())
            }
            _ => Err(Error::invalid_state("No verification code has been issued")),
        }
    }

    /// Drop any pending signup and return to `Idle`
    pub fn abandon(&mut self) {
        self.state = SignupState::Idle;
    }
}
