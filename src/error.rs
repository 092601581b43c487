//! Error types for the hospital registry.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use crate::domain::HospitalKind;
use thiserror::Error;

/// Errors raised while validating, building, or persisting a hospital registration.
#[derive(Error, Debug)]
pub enum RegistrationError {
    /// Required attributes were absent when building an aggregate
    #[error("Field missing. {} is required for {model}", .fields.join(", "))]
    MissingField {
        fields: Vec<&'static str>,
        model: HospitalKind,
    },

    /// A value object failed its own validation
    #[error("Invalid value for {field} on {model}: {reason}")]
    InvalidFieldValue {
        model: HospitalKind,
        field: &'static str,
        reason: String,
    },

    /// The inbound registration request violated a request-level rule
    #[error("Invalid registration entry: {0}")]
    InvalidRegistrationEntry(String),

    /// A pre-existence check found a conflicting record
    #[error("Record already exists in {table}: {hospital_name}")]
    RecordAlreadyExists {
        table: String,
        hospital_name: String,
    },

    /// The repository built a different variant than the save operation expects
    #[error("Expected {expected} but built {actual}")]
    VariantMismatch {
        expected: HospitalKind,
        actual: HospitalKind,
    },

    /// A unit of work was entered while a previous one left writes unresolved
    #[error("There are {0} pending transactions left over from a unit of work that did not complete")]
    PendingTransactions(usize),

    /// The storage session could not be acquired
    #[error("Storage session unavailable: {0}")]
    SessionUnavailable(String),

    /// The backing store failed
    #[error("Storage error: {0}")]
    Storage(#[from] M3oApiError),
}

impl RegistrationError {
    /// Whether the caller supplied bad input (as opposed to a storage failure).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidFieldValue { .. }
                | Self::InvalidRegistrationEntry(_)
        )
    }

    /// Whether the registration conflicts with an existing record.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::RecordAlreadyExists { .. })
    }

    /// The aggregate variant this error was raised for, if any.
    pub fn model(&self) -> Option<HospitalKind> {
        match self {
            Self::MissingField { model, .. } | Self::InvalidFieldValue { model, .. } => {
                Some(*model)
            }
            Self::VariantMismatch { expected, .. } => Some(*expected),
            _ => None,
        }
    }
}

/// Errors that can occur when interacting with the M3O database API.
#[derive(Error, Debug)]
pub enum M3oApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with RegistrationError
pub type RegistrationResult<T> = Result<T, RegistrationError>;

/// Convenience type alias for Results with M3oApiError
pub type M3oApiResult<T> = Result<T, M3oApiError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
