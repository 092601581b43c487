//! VerificationStatus value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Verification state of a hospital known from an external source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    Verified,
    Unverified,
    VerificationPending,
}

impl VerificationStatus {
    pub const ALL: [VerificationStatus; 3] =
        [Self::Verified, Self::Unverified, Self::VerificationPending];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Verified => "verified",
            Self::Unverified => "unverified",
            Self::VerificationPending => "verification_pending",
        }
    }

    /// Whether this status makes a hospital eligible to be recorded as unclaimed.
    ///
    /// Only `verified` and `verification_pending` qualify; an `unverified`
    /// status carries no more information than no status at all.
    pub fn can_be_verified(&self) -> bool {
        matches!(self, Self::Verified | Self::VerificationPending)
    }

    pub fn items() -> Vec<(String, &'static str)> {
        Self::ALL
            .iter()
            .map(|status| (format!("{:?}", status), status.as_str()))
            .collect()
    }
}

impl FromStr for VerificationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "verification status",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
