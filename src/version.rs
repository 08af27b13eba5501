//! Rosetta schema generations and the marker types that select them.

use crate::types::{v1_4_1, v1_4_8};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;

/// A Rosetta schema generation supported by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RosettaVersion {
    V1_4_1,
    V1_4_8,
}

impl RosettaVersion {
    pub const ALL: [RosettaVersion; 2] = [RosettaVersion::V1_4_1, RosettaVersion::V1_4_8];

    /// The tag as written in `Version::rosetta_version`, e.g. `"1.4.8"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_4_1 => "1.4.1",
            Self::V1_4_8 => "1.4.8",
        }
    }
}

impl fmt::Display for RosettaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a version tag names no supported schema generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported Rosetta version `{0}` (supported: 1.4.1, 1.4.8)")]
pub struct UnsupportedVersion(pub String);

impl FromStr for RosettaVersion {
    type Err = UnsupportedVersion;

    /// Accepts `1.4.1` and `1.4.8`, with or without a leading `v`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let trimmed = tag.trim();
        let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
        match bare {
            "1.4.1" => Ok(Self::V1_4_1),
            "1.4.8" => Ok(Self::V1_4_8),
            _ => Err(UnsupportedVersion(tag.to_string())),
        }
    }
}

/// Selects the request/response shapes that differ between schema
/// generations.
///
/// [`RosettaClient`](crate::client::RosettaClient) is generic over this trait;
/// every endpoint whose wire shape is identical across generations uses the
/// shared types from [`crate::types`] instead.
pub trait SchemaVersion: Send + Sync + 'static {
    const VERSION: RosettaVersion;

    type AccountBalanceRequest: Serialize + Send + Sync;
    type AccountBalanceResponse: DeserializeOwned + Send;
    type ConstructionDeriveResponse: DeserializeOwned + Send;
    type ConstructionParseResponse: DeserializeOwned + Send;
}

/// Marker for the Rosetta v1.4.1 schema.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_4_1;

/// Marker for the Rosetta v1.4.8 schema.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct V1_4_8;

impl SchemaVersion for V1_4_1 {
    const VERSION: RosettaVersion = RosettaVersion::V1_4_1;

    type AccountBalanceRequest = v1_4_1::AccountBalanceRequest;
    type AccountBalanceResponse = v1_4_1::AccountBalanceResponse;
    type ConstructionDeriveResponse = v1_4_1::ConstructionDeriveResponse;
    type ConstructionParseResponse = v1_4_1::ConstructionParseResponse;
}

impl SchemaVersion for V1_4_8 {
    const VERSION: RosettaVersion = RosettaVersion::V1_4_8;

    type AccountBalanceRequest = v1_4_8::AccountBalanceRequest;
    type AccountBalanceResponse = v1_4_8::AccountBalanceResponse;
    type ConstructionDeriveResponse = v1_4_8::ConstructionDeriveResponse;
    type ConstructionParseResponse = v1_4_8::ConstructionParseResponse;
}
