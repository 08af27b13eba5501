//! Client configuration.

use crate::headers::RequestOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "https://api.lunar.dev/v1";

/// Where a client sends its requests and which extra headers it attaches.
///
/// Deserializable from any serde format; missing fields fall back to
/// [`ClientConfig::default`].
///
/// ```
/// use rosetta_client::ClientConfig;
///
/// let config = ClientConfig::new("https://rosetta.example.com")
///     .with_header("X-Api-Key", "secret");
/// assert_eq!(config.base_url, "https://rosetta.example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headers: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            headers: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Add one header, keeping any already configured.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the configured headers.
    pub fn with_headers(mut self, headers: Option<BTreeMap<String, String>>) -> Self {
        self.headers = headers;
        self
    }

    pub fn request_options(&self) -> RequestOptions {
        RequestOptions::from_headers(self.headers.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_points_at_public_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.request_options().is_empty());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig = serde_json::from_value(json!({
            "headers": { "X-Api-Key": "abc" }
        }))
        .unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(
            config.headers.as_ref().and_then(|h| h.get("X-Api-Key")).map(String::as_str),
            Some("abc")
        );

        let empty: ClientConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, ClientConfig::default());
    }

    #[test]
    fn with_header_accumulates() {
        let config = ClientConfig::new("http://localhost:8080")
            .with_header("X-Api-Key", "abc")
            .with_header("X-Trace", "1");
        let headers = config.headers.unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["X-Trace"], "1");
    }
}
