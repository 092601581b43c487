//! PhoneNumber value object.

use super::errors::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A type-safe wrapper for international phone numbers.
///
/// The number is parsed without assuming a default region, so it must carry
/// its country calling code. It is accepted only when it is both a viable
/// (possible) number and a valid number for the region it resolves to. The
/// original string is kept verbatim.
///
/// # Example
///
/// ```
/// use hospital_registry::domain::PhoneNumber;
///
/// let phone = PhoneNumber::new("+919425411234").unwrap();
/// assert_eq!(phone.as_str(), "+919425411234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a new PhoneNumber, validating it against the numbering plan metadata.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPhone` if the number cannot be parsed,
    /// is not a possible number, or is not valid for its region.
    pub fn new(phone: impl Into<String>) -> Result<Self, ValidationError> {
        let phone = phone.into();

        if !Self::is_valid(&phone) {
            return Err(ValidationError::InvalidPhone(phone));
        }

        Ok(Self(phone))
    }

    fn is_valid(phone: &str) -> bool {
        if !phonenumber::is_viable(phone) {
            return false;
        }

        match phonenumber::parse(None, phone) {
            Ok(parsed) => phonenumber::is_valid(&parsed),
            Err(_) => false,
        }
    }

    /// Get the phone number as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Serde support - serialize as string
impl Serialize for PhoneNumber {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

// Serde support - deserialize from string with validation
impl<'de> Deserialize<'de> for PhoneNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        PhoneNumber::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
