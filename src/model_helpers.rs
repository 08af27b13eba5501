//! Ergonomic constructors for common request models, plus timestamp and
//! operation-graph accessors on response models.

use crate::types::{
    AccountIdentifier, ApiError, Block, BlockIdentifier, BlockRequest, NetworkIdentifier,
    NetworkRequest, NetworkStatusResponse, Operation, PartialBlockIdentifier,
    SubNetworkIdentifier,
};
use chrono::{DateTime, Utc};

impl NetworkIdentifier {
    /// Identify a non-sharded network.
    pub fn new(blockchain: impl Into<String>, network: impl Into<String>) -> Self {
        Self {
            blockchain: blockchain.into(),
            network: network.into(),
            sub_network_identifier: None,
        }
    }

    /// Narrow this identifier to one shard.
    pub fn with_sub_network(mut self, network: impl Into<String>) -> Self {
        self.sub_network_identifier = Some(SubNetworkIdentifier {
            network: network.into(),
            metadata: None,
        });
        self
    }
}

impl AccountIdentifier {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            sub_account: None,
            metadata: None,
        }
    }
}

impl PartialBlockIdentifier {
    /// Refers to whatever block the server considers current.
    pub fn current() -> Self {
        Self::default()
    }

    pub fn at_index(index: i64) -> Self {
        Self {
            index: Some(index),
            hash: None,
        }
    }

    pub fn at_hash(hash: impl Into<String>) -> Self {
        Self {
            index: None,
            hash: Some(hash.into()),
        }
    }

    /// Returns `true` when neither index nor hash is set.
    pub fn is_current(&self) -> bool {
        self.index.is_none() && self.hash.is_none()
    }
}

impl From<BlockIdentifier> for PartialBlockIdentifier {
    fn from(value: BlockIdentifier) -> Self {
        Self {
            index: Some(value.index),
            hash: Some(value.hash),
        }
    }
}

impl BlockRequest {
    pub fn new(
        network_identifier: NetworkIdentifier,
        block_identifier: impl Into<PartialBlockIdentifier>,
    ) -> Self {
        Self {
            network_identifier,
            block_identifier: block_identifier.into(),
        }
    }
}

impl NetworkRequest {
    pub fn new(network_identifier: NetworkIdentifier) -> Self {
        Self {
            network_identifier,
            metadata: None,
        }
    }
}

impl Block {
    /// Block timestamp as a UTC datetime. `None` if the millisecond value is
    /// out of `chrono`'s range.
    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

impl NetworkStatusResponse {
    /// Timestamp of the current block as a UTC datetime.
    pub fn current_block_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.current_block_timestamp)
    }
}

impl Operation {
    /// Returns `true` if every related operation has a lower index than this
    /// one, which keeps the operations of a transaction acyclic.
    ///
    /// The client does not check this on requests or responses.
    pub fn references_earlier_only(&self) -> bool {
        let own = self.operation_identifier.index;
        self.related_operations
            .iter()
            .flatten()
            .all(|related| related.index < own)
    }
}

impl ApiError {
    /// Returns `true` if the server says the same request may succeed later.
    pub fn is_retriable(&self) -> bool {
        self.retriable
    }

    /// Look up one entry of the error's `details` object.
    pub fn detail(&self, key: &str) -> Option<&serde_json::Value> {
        self.details.as_ref()?.get(key)
    }
}
