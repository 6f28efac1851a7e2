//! Iranian mobile number validation.

use std::fmt;

/// Required prefix for a mobile number.
const PREFIX: &str = "09";

/// Total length of a valid number, prefix included.
const PHONE_LEN: usize = 11;

/// Why a phone number input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Nothing was entered.
    Empty,
    /// Input is present but not `09` followed by nine digits.
    Malformed,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Empty => write!(f, "Phone number is required"),
            ValidationError::Malformed => write!(
                f,
                "Please enter a valid Iranian phone number (e.g., 09123456789)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Returns true iff `input` is exactly `09` followed by nine ASCII digits.
pub fn is_valid_phone(input: &str) -> bool {
    input.len() == PHONE_LEN
        && input.starts_with(PREFIX)
        && input.bytes().all(|b| b.is_ascii_digit())
}

/// Validates a phone number, distinguishing empty input from a malformed one.
///
/// # Errors
/// Returns `ValidationError::Empty` for an empty string and
/// `ValidationError::Malformed` for anything `is_valid_phone` rejects.
pub fn validate_phone(input: &str) -> Result<(), ValidationError> {
    if input.is_empty() {
        return Err(ValidationError::Empty);
    }
    if !is_valid_phone(input) {
        return Err(ValidationError::Malformed);
    }
    Ok(())
}
