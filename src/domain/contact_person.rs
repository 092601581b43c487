//! ContactPerson value object.

use super::email::EmailAddress;
use super::phone::PhoneNumber;
use serde::{Deserialize, Serialize};

/// Key contact person registering a hospital.
///
/// Unknown fields are rejected on deserialization; nested phone and email
/// values are validated by their own value objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactPerson {
    name: String,
    mobile_number: PhoneNumber,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    email: Option<EmailAddress>,
}

impl ContactPerson {
    pub fn new(
        name: impl Into<String>,
        mobile_number: PhoneNumber,
        email: Option<EmailAddress>,
    ) -> Self {
        Self {
            name: name.into(),
            mobile_number,
            email,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mobile_number(&self) -> &PhoneNumber {
        &self.mobile_number
    }

    pub fn email(&self) -> Option<&EmailAddress> {
        self.email.as_ref()
    }
}
