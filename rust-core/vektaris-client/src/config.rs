// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Client configuration and identity resolution.
//!
//! Three layers feed every request, highest priority first:
//!
//! 1. per-call [`IdentityOverrides`] carried in the operation options,
//! 2. the [`ClientConfig`] the client was constructed with,
//! 3. the `VEKTARIS_*` environment, captured once via
//!    [`ClientConfig::from_env`] / [`ClientConfig::with_env_defaults`].
//!
//! The environment is read only when a config is built, never per call.

use std::time::Duration;

use serde::Serialize;

use crate::error::{Operation, Result, VektarisError};

/// Base URL used when neither the caller nor the environment provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Environment variable holding the base URL.
pub const ENV_BASE_URL: &str = "VEKTARIS_BASE_URL";
/// Environment variable holding the default user key.
pub const ENV_USER_KEY: &str = "VEKTARIS_USER_KEY";
/// Environment variable holding the default database name.
pub const ENV_DB_NAME: &str = "VEKTARIS_DB_NAME";
/// Environment variable holding the default account.
pub const ENV_ACCOUNT: &str = "VEKTARIS_ACCOUNT";

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Construction-time defaults for a [`VektarisClient`](crate::client::VektarisClient).
///
/// Empty strings are treated the same as absent values everywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the Vektaris API.
    pub base_url: Option<String>,
    /// Default user key.
    pub user_key: Option<String>,
    /// Default database (namespace) name.
    pub db_name: Option<String>,
    /// Default account.
    pub account: Option<String>,
    /// Per-request timeout. `None` leaves it to the HTTP client.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the `VEKTARIS_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup using the
    /// `VEKTARIS_*` variable names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            base_url: non_empty(lookup(ENV_BASE_URL)),
            user_key: non_empty(lookup(ENV_USER_KEY)),
            db_name: non_empty(lookup(ENV_DB_NAME)),
            account: non_empty(lookup(ENV_ACCOUNT)),
            timeout: None,
        }
    }

    /// Merge with `fallback`, field by field. Values already set on `self`
    /// win.
    pub fn or(self, fallback: ClientConfig) -> Self {
        Self {
            base_url: first(self.base_url, fallback.base_url),
            user_key: first(self.user_key, fallback.user_key),
            db_name: first(self.db_name, fallback.db_name),
            account: first(self.account, fallback.account),
            timeout: self.timeout.or(fallback.timeout),
        }
    }

    /// Fill unset fields from the current environment.
    pub fn with_env_defaults(self) -> Self {
        self.or(Self::from_env())
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the default user key.
    pub fn with_user_key(mut self, user_key: impl Into<String>) -> Self {
        self.user_key = Some(user_key.into());
        self
    }

    /// Set the default database name.
    pub fn with_db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    /// Set the default account.
    pub fn with_account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }

    /// Set a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Base URL after applying the [`DEFAULT_BASE_URL`] fallback.
    pub fn resolved_base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Per-call identity overrides. Unset fields fall back to the client's
/// [`ClientConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityOverrides {
    /// User key for this call.
    pub user_key: Option<String>,
    /// Database name for this call.
    pub db_name: Option<String>,
    /// Account for this call.
    pub account: Option<String>,
}

impl IdentityOverrides {
    /// Override the user key.
    pub fn user_key(mut self, user_key: impl Into<String>) -> Self {
        self.user_key = Some(user_key.into());
        self
    }

    /// Override the database name.
    pub fn db_name(mut self, db_name: impl Into<String>) -> Self {
        self.db_name = Some(db_name.into());
        self
    }

    /// Override the account.
    pub fn account(mut self, account: impl Into<String>) -> Self {
        self.account = Some(account.into());
        self
    }
}

/// Fully resolved identity sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// User key.
    pub user_key: String,
    /// Database name.
    pub db_name: String,
    /// Account.
    pub account: String,
}

/// Merge per-call overrides with construction-time defaults.
///
/// # Errors
///
/// Returns [`VektarisError::Validation`] listing every identity field that is
/// missing or empty in both layers.
pub fn resolve_identity(
    operation: Operation,
    overrides: &IdentityOverrides,
    defaults: &ClientConfig,
) -> Result<Identity> {
    let user_key = pick(&overrides.user_key, &defaults.user_key);
    let db_name = pick(&overrides.db_name, &defaults.db_name);
    let account = pick(&overrides.account, &defaults.account);

    match (user_key, db_name, account) {
        (Some(user_key), Some(db_name), Some(account)) => Ok(Identity {
            user_key: user_key.to_owned(),
            db_name: db_name.to_owned(),
            account: account.to_owned(),
        }),
        (user_key, db_name, account) => {
            let missing = [
                ("userKey", user_key.is_none()),
                ("dbName", db_name.is_none()),
                ("account", account.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            Err(VektarisError::missing(operation, missing))
        }
    }
}

fn pick<'a>(call: &'a Option<String>, default: &'a Option<String>) -> Option<&'a str> {
    call.as_deref()
        .filter(|v| !v.is_empty())
        .or_else(|| default.as_deref().filter(|v| !v.is_empty()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn first(primary: Option<String>, fallback: Option<String>) -> Option<String> {
    non_empty(primary).or_else(|| non_empty(fallback))
}
