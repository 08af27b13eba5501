//! Typed Rust models and async client for the Rosetta blockchain API.
//!
//! This crate provides strongly-typed request/response models for the
//! [Rosetta API](https://docs.cdp.coinbase.com/mesh/docs/welcome) and an
//! async client that POSTs them to a Rosetta-compliant server.
//!
//! Two schema generations are supported, v1.4.1 and v1.4.8. Their shapes
//! differ on a handful of endpoints (v1.4.8 drops `coins` from
//! `/account/balance` and adds `/account/coins`, among others), so the client
//! is generic over a [`SchemaVersion`] marker.
//!
//! # Features
//!
//! - **`types` module** — All request/response models, usable without any
//!   additional features.
//! - **`client` module** (enabled by default) — An async client built on
//!   `reqwest`, plus [`select_client`] for picking a schema generation at
//!   runtime.
//!
//! # Quick start
//!
//! ```no_run
//! use rosetta_client::{RosettaClient, V1_4_8, types::*};
//!
//! #[tokio::main]
//! async fn main() -> rosetta_client::client::Result<()> {
//!     let client = RosettaClient::<V1_4_8>::new("https://rosetta.example.com");
//!     let network = NetworkIdentifier::new("bitcoin", "mainnet");
//!     let status = client.network_status(NetworkRequest::new(network)).await?;
//!     println!("Tip: {}", status.current_block_identifier.index);
//!     Ok(())
//! }
//! ```

mod amount_helpers;
pub mod config;
pub mod endpoints;
pub mod headers;
mod model_helpers;
pub mod types;
pub mod version;

pub use amount_helpers::MAX_DECIMALS;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use headers::RequestOptions;
pub use version::{RosettaVersion, SchemaVersion, UnsupportedVersion, V1_4_1, V1_4_8};

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "client")]
mod selector;

#[cfg(feature = "client")]
pub use client::RosettaClient;
#[cfg(feature = "client")]
pub use selector::{VersionedClient, select_client};

pub use types::*;
