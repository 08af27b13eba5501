//! Async HTTP client for the Rosetta API.

use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::endpoints;
use crate::headers::RequestOptions;
use crate::types::*;
use crate::version::{RosettaVersion, SchemaVersion, UnsupportedVersion, V1_4_8};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// Client error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport failure reported by `reqwest`: connection refused, DNS, TLS,
    /// or a body that could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The server answered with a non-2xx status. The body is kept verbatim.
    #[error("HTTP status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    UnsupportedVersion(#[from] UnsupportedVersion),
    #[error("invalid header {0}")]
    InvalidHeader(String),
}

impl Error {
    /// Returns the HTTP status for [`Error::Status`], or the status attached to
    /// a transport error if `reqwest` recorded one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Decodes a non-2xx body as a Rosetta [`ApiError`], if it is one.
    ///
    /// Rosetta servers answer failed requests with a `500` and an `Error`
    /// object such as:
    ///
    /// ```json
    /// { "code": 12, "message": "Invalid account", "retriable": false }
    /// ```
    pub fn api_error(&self) -> Option<ApiError> {
        match self {
            Self::Status { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }

    /// Returns `true` if the server marked the failure as retriable.
    pub fn is_retriable(&self) -> bool {
        self.api_error().is_some_and(|error| error.is_retriable())
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Async client for a Rosetta API server.
///
/// `V` selects the schema generation; endpoints whose shapes changed between
/// generations use `V`'s associated types. `/account/coins` is only available
/// on [`RosettaClient<V1_4_8>`].
///
/// Clones share the underlying connection pool.
///
/// # Example
///
/// ```no_run
/// use rosetta_client::{RosettaClient, V1_4_8, types::*};
///
/// #[tokio::main]
/// async fn main() -> rosetta_client::client::Result<()> {
///     let client = RosettaClient::<V1_4_8>::new("https://rosetta.example.com");
///     let networks = client.network_list(MetadataRequest::default()).await?;
///     for network in networks.network_identifiers {
///         println!("{} / {}", network.blockchain, network.network);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RosettaClient<V: SchemaVersion = V1_4_8> {
    client: Client,
    base_url: String,
    options: RequestOptions,
    headers: Option<HeaderMap>,
    _version: PhantomData<fn() -> V>,
}

impl<V: SchemaVersion> Default for RosettaClient<V> {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl<V: SchemaVersion> RosettaClient<V> {
    /// Create a client for `base_url` without extra headers.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base_url(base_url.into()),
            options: RequestOptions::default(),
            headers: None,
            _version: PhantomData,
        }
    }

    /// Create a client for a local `rosetta-cli` style server on port 8080.
    pub fn local() -> Self {
        Self::new("http://localhost:8080")
    }

    /// Create a client from a [`ClientConfig`], validating its headers.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let options = config.request_options();
        let headers = options.header_map()?;
        Ok(Self {
            client: Client::new(),
            base_url: normalize_base_url(config.base_url),
            options,
            headers,
            _version: PhantomData,
        })
    }

    /// Use a preconfigured `reqwest` client, e.g. one with a proxy or custom
    /// TLS roots.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Headers attached to every request.
    pub fn headers(&self) -> &RequestOptions {
        &self.options
    }

    pub fn version(&self) -> RosettaVersion {
        V::VERSION
    }

    async fn call<P, R>(&self, path: &'static str, request: &P) -> Result<R>
    where
        P: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(path, %url, version = %V::VERSION, "sending Rosetta request");

        let mut builder = self.client.post(&url).json(request);
        if let Some(headers) = &self.headers {
            builder = builder.headers(headers.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(
            path,
            status = status.as_u16(),
            bytes = body.len(),
            "received Rosetta response"
        );

        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "Rosetta request failed");
            return Err(Error::Status {
                status,
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }

    // ── Account ──────────────────────────────────────────────────

    /// Returns the balances of an account, optionally at a historical block.
    pub async fn account_balance(
        &self,
        request: V::AccountBalanceRequest,
    ) -> Result<V::AccountBalanceResponse> {
        self.call(endpoints::ACCOUNT_BALANCE, &request).await
    }

    // ── Block ────────────────────────────────────────────────────

    /// Returns a block by index and/or hash, or the current block when both
    /// are omitted.
    pub async fn block(&self, request: BlockRequest) -> Result<BlockResponse> {
        self.call(endpoints::BLOCK, &request).await
    }

    /// Returns a transaction listed in a block's `other_transactions`.
    pub async fn block_transaction(
        &self,
        request: BlockTransactionRequest,
    ) -> Result<BlockTransactionResponse> {
        self.call(endpoints::BLOCK_TRANSACTION, &request).await
    }

    // ── Network ──────────────────────────────────────────────────

    /// Returns the networks this server supports.
    pub async fn network_list(&self, request: MetadataRequest) -> Result<NetworkListResponse> {
        self.call(endpoints::NETWORK_LIST, &request).await
    }

    /// Returns the version and allowed operation types/statuses/errors of a
    /// network.
    pub async fn network_options(
        &self,
        request: NetworkRequest,
    ) -> Result<NetworkOptionsResponse> {
        self.call(endpoints::NETWORK_OPTIONS, &request).await
    }

    /// Returns the current tip, genesis block, sync status and peers.
    pub async fn network_status(&self, request: NetworkRequest) -> Result<NetworkStatusResponse> {
        self.call(endpoints::NETWORK_STATUS, &request).await
    }

    // ── Mempool ──────────────────────────────────────────────────

    /// Returns the identifiers of all transactions in the mempool.
    pub async fn mempool(&self, request: NetworkRequest) -> Result<MempoolResponse> {
        self.call(endpoints::MEMPOOL, &request).await
    }

    pub async fn mempool_transaction(
        &self,
        request: MempoolTransactionRequest,
    ) -> Result<MempoolTransactionResponse> {
        self.call(endpoints::MEMPOOL_TRANSACTION, &request).await
    }

    // ── Construction ─────────────────────────────────────────────

    /// Builds a signed transaction from an unsigned one and its signatures.
    pub async fn construction_combine(
        &self,
        request: ConstructionCombineRequest,
    ) -> Result<ConstructionCombineResponse> {
        self.call(endpoints::CONSTRUCTION_COMBINE, &request).await
    }

    /// Derives an address from a public key.
    pub async fn construction_derive(
        &self,
        request: ConstructionDeriveRequest,
    ) -> Result<V::ConstructionDeriveResponse> {
        self.call(endpoints::CONSTRUCTION_DERIVE, &request).await
    }

    /// Returns the network-specific hash of a signed transaction.
    pub async fn construction_hash(
        &self,
        request: ConstructionHashRequest,
    ) -> Result<TransactionIdentifierResponse> {
        self.call(endpoints::CONSTRUCTION_HASH, &request).await
    }

    /// Fetches the online metadata needed to build a transaction.
    pub async fn construction_metadata(
        &self,
        request: ConstructionMetadataRequest,
    ) -> Result<ConstructionMetadataResponse> {
        self.call(endpoints::CONSTRUCTION_METADATA, &request).await
    }

    /// Decodes a signed or unsigned transaction back into operations.
    pub async fn construction_parse(
        &self,
        request: ConstructionParseRequest,
    ) -> Result<V::ConstructionParseResponse> {
        self.call(endpoints::CONSTRUCTION_PARSE, &request).await
    }

    /// Builds an unsigned transaction and the payloads that must be signed.
    pub async fn construction_payloads(
        &self,
        request: ConstructionPayloadsRequest,
    ) -> Result<ConstructionPayloadsResponse> {
        self.call(endpoints::CONSTRUCTION_PAYLOADS, &request).await
    }

    /// Produces the options passed to `/construction/metadata`.
    pub async fn construction_preprocess(
        &self,
        request: ConstructionPreprocessRequest,
    ) -> Result<ConstructionPreprocessResponse> {
        self.call(endpoints::CONSTRUCTION_PREPROCESS, &request).await
    }

    /// Broadcasts a signed transaction.
    pub async fn construction_submit(
        &self,
        request: ConstructionSubmitRequest,
    ) -> Result<TransactionIdentifierResponse> {
        self.call(endpoints::CONSTRUCTION_SUBMIT, &request).await
    }
}

impl RosettaClient<V1_4_8> {
    /// Returns the unspent coins of an account. Only served by v1.4.8 servers.
    pub async fn account_coins(
        &self,
        request: v1_4_8::AccountCoinsRequest,
    ) -> Result<v1_4_8::AccountCoinsResponse> {
        self.call(endpoints::ACCOUNT_COINS, &request).await
    }
}

fn normalize_base_url(mut base_url: String) -> String {
    if base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
