// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Vektaris client construction and the shared request path.
//!
//! [`VektarisClient`] is the primary entry point for all SDK operations. It
//! owns the frozen construction-time defaults and a [`Transport`].
//! Operation methods (namespaces, embeddings, search) are defined as
//! `impl VektarisClient` blocks in their respective modules.

use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{resolve_identity, ClientConfig, Identity, IdentityOverrides};
use crate::error::{Operation, Result, TransportError, VektarisError};
use crate::transport::{HttpTransport, Transport};

/// The Vektaris API client.
///
/// Cheap to clone; clones share the same transport.
///
/// # Examples
///
/// ```rust,no_run
/// use vektaris_client::client::VektarisClient;
/// use vektaris_client::config::ClientConfig;
/// use vektaris_client::types::CreateDatabaseOptions;
///
/// # #[tokio::main]
/// # async fn main() -> vektaris_client::error::Result<()> {
/// let config = ClientConfig::new()
///     .with_user_key("uk-123")
///     .with_db_name("articles")
///     .with_account("0xabc");
/// let client = VektarisClient::new(config)?;
/// let created = client.create_database(&CreateDatabaseOptions::new()).await?;
/// println!("{created}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct VektarisClient {
    /// Defaults captured at construction.
    config: ClientConfig,
    /// Outbound HTTP seam.
    transport: Arc<dyn Transport>,
}

impl std::fmt::Debug for VektarisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VektarisClient")
            .field("base_url", &self.config.resolved_base_url())
            .field("db_name", &self.config.db_name)
            .field("account", &self.config.account)
            .finish_non_exhaustive()
    }
}

impl VektarisClient {
    // -- Constructors -------------------------------------------------------

    /// Create a client from an explicit configuration. The environment is
    /// not consulted; use [`ClientConfig::with_env_defaults`] for that.
    ///
    /// # Errors
    ///
    /// Returns [`VektarisError::Config`] if the base URL cannot be parsed.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(config.resolved_base_url(), config.timeout)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a client from a snapshot of the `VEKTARIS_*` environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// Create a client that sends requests through `transport`.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// The construction-time defaults.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // -- Internal request path ----------------------------------------------

    /// Resolve the identity for one call against this client's defaults.
    pub(crate) fn identity(
        &self,
        operation: Operation,
        overrides: &IdentityOverrides,
    ) -> Result<Identity> {
        resolve_identity(operation, overrides, &self.config)
    }

    /// Serialize `body`, POST it to the operation's path, and decode the
    /// response into `T`.
    pub(crate) async fn send<B, T>(&self, operation: Operation, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let wrap = |source: TransportError| VektarisError::transport(operation, source);

        let body = serde_json::to_value(body).map_err(|e| wrap(e.into()))?;
        debug!(%operation, path = operation.path(), "sending request");

        let response = match self.transport.post_json(operation.path(), body).await {
            Ok(response) => response,
            Err(source) => {
                warn!(%operation, error = %source, "request failed");
                return Err(wrap(source));
            }
        };

        decode(response).map_err(|e| wrap(e.into()))
    }
}

/// Decode an opaque response body into the caller's type. `Value` passes
/// through unchanged.
fn decode<T: DeserializeOwned>(value: Value) -> serde_json::Result<T> {
    serde_json::from_value(value)
}

// ---------------------------------------------------------------------------
// Shared default instance
// ---------------------------------------------------------------------------

static SHARED: OnceLock<VektarisClient> = OnceLock::new();

/// Process-wide default client, built from the environment on first use.
///
/// # Errors
///
/// Returns [`VektarisError::Config`] if `VEKTARIS_BASE_URL` is not a valid
/// URL. A failed build is not cached.
pub fn shared() -> Result<&'static VektarisClient> {
    if let Some(client) = SHARED.get() {
        return Ok(client);
    }
    let client = VektarisClient::from_env()?;
    Ok(SHARED.get_or_init(|| client))
}

// ---------------------------------------------------------------------------
// Test support
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod mock {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::error::TransportError;
    use crate::transport::Transport;

    use crate::config::ClientConfig;

    /// Client defaults with every identity field set.
    pub(crate) fn full_config() -> ClientConfig {
        ClientConfig::new()
            .with_user_key("uk-secret")
            .with_db_name("A")
            .with_account("acct")
    }

    /// Recording transport that replays a canned reply.
    pub(crate) struct MockTransport {
        reply: Result<Value, String>,
        calls: Mutex<Vec<(String, Value)>>,
    }

    impl MockTransport {
        pub(crate) fn ok(reply: Value) -> Self {
            Self {
                reply: Ok(reply),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_owned()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }

        pub(crate) fn last_call(&self) -> (String, Value) {
            self.calls.lock().unwrap().last().cloned().expect("no calls recorded")
        }

        pub(crate) fn calls(&self) -> Vec<(String, Value)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn post_json(&self, path: &str, body: Value) -> Result<Value, TransportError> {
            self.calls.lock().unwrap().push((path.to_owned(), body));
            self.reply.clone().map_err(TransportError::Message)
        }
    }
}
