//! Endpoint paths, relative to a server's base URL.

use crate::version::RosettaVersion;

pub const ACCOUNT_BALANCE: &str = "/account/balance";
/// Only served by v1.4.8 servers.
pub const ACCOUNT_COINS: &str = "/account/coins";
pub const BLOCK: &str = "/block";
pub const BLOCK_TRANSACTION: &str = "/block/transaction";
pub const NETWORK_LIST: &str = "/network/list";
pub const NETWORK_OPTIONS: &str = "/network/options";
pub const NETWORK_STATUS: &str = "/network/status";
pub const MEMPOOL: &str = "/mempool";
pub const MEMPOOL_TRANSACTION: &str = "/mempool/transaction";
pub const CONSTRUCTION_COMBINE: &str = "/construction/combine";
pub const CONSTRUCTION_DERIVE: &str = "/construction/derive";
pub const CONSTRUCTION_HASH: &str = "/construction/hash";
pub const CONSTRUCTION_METADATA: &str = "/construction/metadata";
pub const CONSTRUCTION_PARSE: &str = "/construction/parse";
pub const CONSTRUCTION_PAYLOADS: &str = "/construction/payloads";
pub const CONSTRUCTION_PREPROCESS: &str = "/construction/preprocess";
pub const CONSTRUCTION_SUBMIT: &str = "/construction/submit";

const V1_4_1_ENDPOINTS: &[&str] = &[
    ACCOUNT_BALANCE,
    BLOCK,
    BLOCK_TRANSACTION,
    NETWORK_LIST,
    NETWORK_OPTIONS,
    NETWORK_STATUS,
    MEMPOOL,
    MEMPOOL_TRANSACTION,
    CONSTRUCTION_COMBINE,
    CONSTRUCTION_DERIVE,
    CONSTRUCTION_HASH,
    CONSTRUCTION_METADATA,
    CONSTRUCTION_PARSE,
    CONSTRUCTION_PAYLOADS,
    CONSTRUCTION_PREPROCESS,
    CONSTRUCTION_SUBMIT,
];

const V1_4_8_ENDPOINTS: &[&str] = &[
    ACCOUNT_BALANCE,
    ACCOUNT_COINS,
    BLOCK,
    BLOCK_TRANSACTION,
    NETWORK_LIST,
    NETWORK_OPTIONS,
    NETWORK_STATUS,
    MEMPOOL,
    MEMPOOL_TRANSACTION,
    CONSTRUCTION_COMBINE,
    CONSTRUCTION_DERIVE,
    CONSTRUCTION_HASH,
    CONSTRUCTION_METADATA,
    CONSTRUCTION_PARSE,
    CONSTRUCTION_PAYLOADS,
    CONSTRUCTION_PREPROCESS,
    CONSTRUCTION_SUBMIT,
];

impl RosettaVersion {
    /// Every endpoint path a client for this version can call.
    pub fn endpoints(&self) -> &'static [&'static str] {
        match self {
            Self::V1_4_1 => V1_4_1_ENDPOINTS,
            Self::V1_4_8 => V1_4_8_ENDPOINTS,
        }
    }
}
