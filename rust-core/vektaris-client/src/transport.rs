// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! HTTP transport layer.
//!
//! [`Transport`] is the single seam between the request facade and the
//! network: one JSON POST in, one decoded JSON body out. [`HttpTransport`] is
//! the `reqwest` implementation used by default; tests and embedders can
//! supply their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::error::{Result, TransportError, VektarisError};

/// Sends a JSON body to a path under some base URL and returns the decoded
/// response body.
///
/// Implementations must be `Send + Sync` for safe sharing across Tokio tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    /// POST `body` to `path` (e.g. `/storeEmbedding`).
    async fn post_json(&self, path: &str, body: Value) -> std::result::Result<Value, TransportError>;
}

// ---------------------------------------------------------------------------
// HttpTransport
// ---------------------------------------------------------------------------

/// `reqwest`-backed [`Transport`] bound to a base URL.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Validated base URL, e.g. `http://localhost:3000` or
    /// `https://api.example.com/v1`.
    base_url: Url,
    /// Underlying `reqwest` HTTP client (connection-pooled, TLS-capable).
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport for `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`VektarisError::Config`] if `base_url` cannot be parsed or the
    /// HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| VektarisError::Config(format!("invalid base URL {base_url:?}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(VektarisError::Config(format!(
                "base URL {base_url} cannot carry request paths"
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| VektarisError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { base_url, http })
    }

    /// The base URL requests are sent under.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append `path` to the base URL's path. A path prefix and query string
    /// on the base are kept; a fragment is dropped.
    pub(crate) fn url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|segment| !segment.is_empty()));
        }
        url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, path: &str, body: Value) -> std::result::Result<Value, TransportError> {
        let response = self.http.post(self.url(path)).json(&body).send().await?;
        handle_response(response).await
    }
}

// -- Response handling --------------------------------------------------------

/// Decode a successful response or turn a non-2xx one into
/// [`TransportError::Status`].
async fn handle_response(response: reqwest::Response) -> std::result::Result<Value, TransportError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return Ok(serde_json::from_str(&body)?);
    }

    Err(TransportError::Status {
        status: status.as_u16(),
        message: error_message(status.as_u16(), &body),
    })
}

/// Status line for a non-2xx response, followed by the body's `message` or
/// `error` field when it has one.
fn error_message(status: u16, body: &str) -> String {
    let status_line = format!("Request failed with status code {status}");
    let detail = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["message", "error"]
            .iter()
            .find_map(|key| value.get(key).and_then(Value::as_str).map(str::to_owned))
    });

    match detail {
        Some(detail) if !detail.is_empty() => format!("{status_line}: {detail}"),
        _ => status_line,
    }
}
