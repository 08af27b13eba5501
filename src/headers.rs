//! Per-request header options.

use serde::Serialize;
use std::collections::BTreeMap;

/// Extra headers attached to every request a client sends.
///
/// Serializes to `{"headers": {...}}` when headers are configured and to `{}`
/// otherwise, so it can be logged or compared without exposing an empty
/// header object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
}

impl RequestOptions {
    /// Build options from an optional header map. An empty map is treated the
    /// same as no map at all.
    pub fn from_headers(headers: Option<BTreeMap<String, String>>) -> Self {
        Self {
            headers: headers.filter(|headers| !headers.is_empty()),
        }
    }

    /// Returns `true` when no extra headers will be attached.
    pub fn is_empty(&self) -> bool {
        self.headers.is_none()
    }

    /// Validate the configured headers into a [`reqwest::header::HeaderMap`].
    #[cfg(feature = "client")]
    pub(crate) fn header_map(&self) -> crate::client::Result<Option<reqwest::header::HeaderMap>> {
        use crate::client::Error;
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        let Some(headers) = &self.headers else {
            return Ok(None);
        };

        let mut map = HeaderMap::with_capacity(headers.len());
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| Error::InvalidHeader(format!("name `{name}`: {e}")))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| Error::InvalidHeader(format!("value for `{name}`: {e}")))?;
            map.insert(header_name, header_value);
        }
        Ok(Some(map))
    }
}
