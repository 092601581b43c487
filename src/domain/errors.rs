//! Domain validation errors.

use std::fmt;

/// Errors that can occur during domain value object validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided email address is invalid.
    InvalidEmail(String),

    /// The provided phone number could not be parsed or is not valid for any region.
    InvalidPhone(String),

    /// A value is not one of the variants of the named enumeration.
    UnknownVariant { kind: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(email) => write!(f, "Invalid email address: {}", email),
            Self::InvalidPhone(phone) => write!(f, "Invalid phone number format: {}", phone),
            Self::UnknownVariant { kind, value } => {
                write!(f, "Unknown {} value: {}", kind, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}
