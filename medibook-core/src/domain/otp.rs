//! One-time verification codes

use std::fmt;

use rand::Rng;

/// Smallest code that can be issued
pub const MIN_CODE: u32 = 100_000;

/// Largest code that can be issued
pub const MAX_CODE: u32 = 999_999;

/// Number of characters in an issued code
pub const CODE_LENGTH: usize = 6;

/// A 6-digit code held in memory only
///
/// There is no expiry and no attempt limit: a code stays valid until it is
/// used or replaced by a resend.
#[derive(Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Draw a new code in `[100000, 999999]`
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(MIN_CODE..=MAX_CODE).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check an entered value against this code
    pub fn matches(&self, entered: &str) -> bool {
        matches(&self.0, entered)
    }
}

// Keep codes out of debug output and logs.
impl fmt::Debug for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OneTimeCode(******)")
    }
}

/// Compare an entered code to the issued one
///
/// The entry is trimmed, then compared by exact string equality.
pub fn matches(issued: &str, entered: &str) -> bool {
    !issued.is_empty() && issued == entered.trim()
}
