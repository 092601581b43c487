//! OwnershipType value object.

use super::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Who owns and operates a hospital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OwnershipType {
    Government,
    Public,
    Private,
    PublicPrivate,
    Charitable,
}

impl OwnershipType {
    pub const ALL: [OwnershipType; 5] = [
        Self::Government,
        Self::Public,
        Self::Private,
        Self::PublicPrivate,
        Self::Charitable,
    ];

    /// The wire value, e.g. `public_private`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Government => "government",
            Self::Public => "public",
            Self::Private => "private",
            Self::PublicPrivate => "public_private",
            Self::Charitable => "charitable",
        }
    }

    /// `(variant name, wire value)` pairs for every ownership type.
    pub fn items() -> Vec<(String, &'static str)> {
        Self::ALL
            .iter()
            .map(|kind| (format!("{:?}", kind), kind.as_str()))
            .collect()
    }
}

impl FromStr for OwnershipType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownVariant {
                kind: "ownership type",
                value: s.to_string(),
            })
    }
}

impl fmt::Display for OwnershipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
