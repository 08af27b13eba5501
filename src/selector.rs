//! Picks a client for a schema generation named at runtime.

use crate::client::{Result, RosettaClient};
use crate::config::ClientConfig;
use crate::version::{RosettaVersion, V1_4_1, V1_4_8};

/// A client for one of the supported schema generations.
///
/// Match on the variant to reach the typed client and its endpoint methods.
#[derive(Debug, Clone)]
pub enum VersionedClient {
    V1_4_1(RosettaClient<V1_4_1>),
    V1_4_8(RosettaClient<V1_4_8>),
}

impl VersionedClient {
    /// Build the client for `version` from `config`.
    pub fn from_version(version: RosettaVersion, config: ClientConfig) -> Result<Self> {
        Ok(match version {
            RosettaVersion::V1_4_1 => Self::V1_4_1(RosettaClient::from_config(config)?),
            RosettaVersion::V1_4_8 => Self::V1_4_8(RosettaClient::from_config(config)?),
        })
    }

    pub fn version(&self) -> RosettaVersion {
        match self {
            Self::V1_4_1(_) => RosettaVersion::V1_4_1,
            Self::V1_4_8(_) => RosettaVersion::V1_4_8,
        }
    }

    pub fn base_url(&self) -> &str {
        match self {
            Self::V1_4_1(client) => client.base_url(),
            Self::V1_4_8(client) => client.base_url(),
        }
    }

    /// Endpoint paths the wrapped client can call.
    pub fn endpoints(&self) -> &'static [&'static str] {
        self.version().endpoints()
    }

    pub fn as_v1_4_1(&self) -> Option<&RosettaClient<V1_4_1>> {
        match self {
            Self::V1_4_1(client) => Some(client),
            Self::V1_4_8(_) => None,
        }
    }

    pub fn as_v1_4_8(&self) -> Option<&RosettaClient<V1_4_8>> {
        match self {
            Self::V1_4_8(client) => Some(client),
            Self::V1_4_1(_) => None,
        }
    }
}

impl From<RosettaClient<V1_4_1>> for VersionedClient {
    fn from(client: RosettaClient<V1_4_1>) -> Self {
        Self::V1_4_1(client)
    }
}

impl From<RosettaClient<V1_4_8>> for VersionedClient {
    fn from(client: RosettaClient<V1_4_8>) -> Self {
        Self::V1_4_8(client)
    }
}

/// Construct the client matching a version tag such as `"1.4.8"` or
/// `"v1.4.1"`.
///
/// Unknown tags fail with [`Error::UnsupportedVersion`](crate::client::Error::UnsupportedVersion).
///
/// ```
/// use rosetta_client::{ClientConfig, RosettaVersion, select_client};
///
/// let client = select_client("v1.4.8", ClientConfig::new("https://api.example.com")).unwrap();
/// assert_eq!(client.version(), RosettaVersion::V1_4_8);
/// assert!(client.as_v1_4_8().is_some());
///
/// assert!(select_client("2.0.0", ClientConfig::default()).is_err());
/// ```
pub fn select_client(tag: &str, config: ClientConfig) -> Result<VersionedClient> {
    let version: RosettaVersion = tag.parse()?;
    tracing::debug!(%version, base_url = %config.base_url, "selected Rosetta client");
    VersionedClient::from_version(version, config)
}
