//! Inbound hospital registration request.

use crate::domain::{Address, GeoLocation, OwnershipType, ValidationError, VerificationStatus};
use crate::error::{RegistrationError, RegistrationResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Accepted `added_since` layouts. The named group that matched selects the
/// parse format.
static ADDED_SINCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?:(?P<zulu>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z)",
        r"|(?P<offset>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2})",
        r"|(?P<datetime>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})",
        r"|(?P<date>\d{4}-\d{2}-\d{2}))$",
    ))
    .expect("Failed to compile added_since regex")
});

/// Key contact person registering a hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RegisterKeyContact {
    /// Full name of the contact
    pub name: String,

    /// Mobile number in international format, e.g. +919425416789
    pub mobile: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Hospital registration details as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct HospitalRegistrationEntry {
    /// Hospital name
    pub name: String,

    /// One of government, public, private, public_private, charitable
    pub ownership_type: String,

    /// Hospital phone number in international format
    pub hospital_contact_number: String,

    /// Person registering the hospital. Required unless a verification status is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_contact: Option<RegisterKeyContact>,

    /// One of verified, unverified, verification_pending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_status: Option<String>,

    pub address: Address,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_location: Option<GeoLocation>,

    /// YYYY-MM-DD, YYYY-MM-DD HH:MM:SS, YYYY-MM-DD HH:MM:SS+HH:MM or YYYY-MM-DDTHH:MM:SSZ
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_since: Option<String>,
}

impl HospitalRegistrationEntry {
    /// Check every request-level rule.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegistrationEntry` describing the first rule violated.
    pub fn validate(&self) -> RegistrationResult<()> {
        self.parsed_ownership_type()?;

        if !is_valid_hospital_name(&self.name) {
            return Err(invalid_entry(format!(
                "Hospital name must be one word of at least 3 characters or several words with at least one of 2 characters: {:?}",
                self.name
            )));
        }

        let status = self.parsed_verified_status()?;
        let has_status = matches!(status, Some(s) if s != VerificationStatus::Unverified);
        match (has_status, self.key_contact.is_some()) {
            (true, false) | (false, true) => {}
            (true, true) => {
                return Err(invalid_entry(
                    "A hospital with a verification status cannot also have a key contact",
                ))
            }
            (false, false) => {
                return Err(invalid_entry(
                    "Either a verification status or a key contact is required",
                ))
            }
        }

        self.parsed_added_since()?;
        Ok(())
    }

    pub fn parsed_ownership_type(&self) -> RegistrationResult<OwnershipType> {
        self.ownership_type
            .parse()
            .map_err(|e: ValidationError| invalid_entry(e.to_string()))
    }

    pub fn parsed_verified_status(&self) -> RegistrationResult<Option<VerificationStatus>> {
        self.verified_status
            .as_deref()
            .map(|status| {
                status
                    .parse()
                    .map_err(|e: ValidationError| invalid_entry(e.to_string()))
            })
            .transpose()
    }

    pub fn parsed_added_since(&self) -> RegistrationResult<Option<DateTime<Utc>>> {
        self.added_since
            .as_deref()
            .map(parse_added_since)
            .transpose()
    }
}

/// Parse an `added_since` timestamp in one of the accepted layouts.
///
/// Timestamps without an offset are taken as UTC; a bare date is UTC midnight.
pub fn parse_added_since(value: &str) -> RegistrationResult<DateTime<Utc>> {
    let invalid = || invalid_entry(format!("Invalid date time format: {}", value));
    let caps = ADDED_SINCE_REGEX.captures(value).ok_or_else(invalid)?;

    if let Some(m) = caps.name("zulu") {
        let naive = NaiveDateTime::parse_from_str(m.as_str(), "%Y-%m-%dT%H:%M:%SZ")
            .map_err(|_| invalid())?;
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Some(m) = caps.name("offset") {
        let parsed = DateTime::parse_from_str(m.as_str(), "%Y-%m-%d %H:%M:%S%z")
            .map_err(|_| invalid())?;
        return Ok(parsed.with_timezone(&Utc));
    }

    if let Some(m) = caps.name("datetime") {
        let naive = NaiveDateTime::parse_from_str(m.as_str(), "%Y-%m-%d %H:%M:%S")
            .map_err(|_| invalid())?;
        return Ok(Utc.from_utc_datetime(&naive));
    }

    let date = caps
        .name("date")
        .and_then(|m| NaiveDate::parse_from_str(m.as_str(), "%Y-%m-%d").ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(invalid)?;
    Ok(Utc.from_utc_datetime(&date))
}

fn is_valid_hospital_name(name: &str) -> bool {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => false,
        [word] => word.chars().count() >= 3,
        words => words.iter().any(|word| word.chars().count() >= 2),
    }
}

fn invalid_entry(message: impl Into<String>) -> RegistrationError {
    RegistrationError::InvalidRegistrationEntry(message.into())
}
