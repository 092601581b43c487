//! Postal address and geo-location value objects.

use super::errors::ValidationError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Postal address of a hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Address {
    pub street: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
}

impl Address {
    /// Validate the address.
    ///
    /// Hook for checking `state` and `country` against ISO 3166 codes; every
    /// address is currently accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Latitude/longitude of a hospital.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct GeoLocation {
    pub lat: f64,
    pub lng: f64,
}
