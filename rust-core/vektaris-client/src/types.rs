// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Operation options and wire request bodies.
//!
//! Every options struct carries an [`IdentityOverrides`] so a single call can
//! target a different user key, database, or account than the client's
//! defaults. Response bodies are not modelled: operations return
//! [`serde_json::Value`] or a caller-chosen `DeserializeOwned` type.

use serde::Serialize;

use crate::config::{Identity, IdentityOverrides};

/// Maximum length of a stored embedding title, in UTF-16 code units.
pub const TITLE_MAX_UNITS: usize = 100;
/// Maximum length of stored embedding content, in UTF-16 code units.
pub const CONTENT_MAX_UNITS: usize = 500;
/// `limit` sent by hybrid search when the caller leaves it unset.
pub const DEFAULT_HYBRID_LIMIT: u32 = 10;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options for [`create_database`](crate::client::VektarisClient::create_database).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDatabaseOptions {
    /// Identity overrides for this call.
    pub identity: IdentityOverrides,
}

impl CreateDatabaseOptions {
    /// Options that use the client's default identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the identity overrides.
    pub fn with_identity(mut self, identity: IdentityOverrides) -> Self {
        self.identity = identity;
        self
    }
}

/// Options for [`store_embedding`](crate::client::VektarisClient::store_embedding).
///
/// `title` and `content` are required. Longer values are cut to
/// [`TITLE_MAX_UNITS`] and [`CONTENT_MAX_UNITS`] before sending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreEmbeddingOptions {
    /// Identity overrides for this call.
    pub identity: IdentityOverrides,
    /// Title of the stored item.
    pub title: String,
    /// Text to embed.
    pub content: String,
}

impl StoreEmbeddingOptions {
    /// Options for storing `content` under `title`.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            identity: IdentityOverrides::default(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Replace the identity overrides.
    pub fn with_identity(mut self, identity: IdentityOverrides) -> Self {
        self.identity = identity;
        self
    }
}

/// Options for [`query_embeddings`](crate::client::VektarisClient::query_embeddings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryEmbeddingsOptions {
    /// Identity overrides for this call.
    pub identity: IdentityOverrides,
    /// Natural-language query. Must be non-empty.
    pub query: String,
    /// Maximum number of results. Omitted from the request when `None`.
    pub limit: Option<u32>,
}

impl QueryEmbeddingsOptions {
    /// Semantic query without a limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set a result limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Replace the identity overrides.
    pub fn with_identity(mut self, identity: IdentityOverrides) -> Self {
        self.identity = identity;
        self
    }
}

/// Options for [`get_embeddings`](crate::client::VektarisClient::get_embeddings).
///
/// `start` and `limit` are forwarded as-is; the server owns their meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetEmbeddingsOptions {
    /// Identity overrides for this call.
    pub identity: IdentityOverrides,
    /// Pagination cursor.
    pub start: u64,
    /// Page size.
    pub limit: u64,
}

impl GetEmbeddingsOptions {
    /// Page of `limit` embeddings starting at `start`.
    pub fn new(start: u64, limit: u64) -> Self {
        Self {
            identity: IdentityOverrides::default(),
            start,
            limit,
        }
    }

    /// Replace the identity overrides.
    pub fn with_identity(mut self, identity: IdentityOverrides) -> Self {
        self.identity = identity;
        self
    }
}

/// Options for [`hybrid_search`](crate::client::VektarisClient::hybrid_search).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HybridSearchOptions {
    /// Identity overrides for this call.
    pub identity: IdentityOverrides,
    /// Search query. Must be non-empty.
    pub query: String,
    /// Maximum number of results; [`DEFAULT_HYBRID_LIMIT`] when `None`.
    pub limit: Option<u32>,
}

impl HybridSearchOptions {
    /// Hybrid search with the default limit.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Set a result limit.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Replace the identity overrides.
    pub fn with_identity(mut self, identity: IdentityOverrides) -> Self {
        self.identity = identity;
        self
    }
}

// ---------------------------------------------------------------------------
// Internal request bodies
// ---------------------------------------------------------------------------

/// Body for `POST /storeEmbedding`.
#[derive(Debug, Serialize)]
pub(crate) struct StoreEmbeddingRequest<'a> {
    #[serde(flatten)]
    pub identity: &'a Identity,
    pub title: &'a str,
    pub content: &'a str,
}

/// Body for `POST /queryEmbeddings` and `POST /hybridSearch`.
#[derive(Debug, Serialize)]
pub(crate) struct SearchRequest<'a> {
    #[serde(flatten)]
    pub identity: &'a Identity,
    pub query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Body for `POST /getEmbeddings`.
#[derive(Debug, Serialize)]
pub(crate) struct GetEmbeddingsRequest<'a> {
    #[serde(flatten)]
    pub identity: &'a Identity,
    pub start: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Cut `input` to at most `max_units` UTF-16 code units.
///
/// A character whose encoding would straddle the limit is dropped whole.
pub fn truncate_utf16(input: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (idx, ch) in input.char_indices() {
        units += ch.len_utf16();
        if units > max_units {
            return &input[..idx];
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_ascii() {
        let title = "t".repeat(150);
        assert_eq!(truncate_utf16(&title, TITLE_MAX_UNITS).len(), 100);
        let exact = "x".repeat(100);
        assert_eq!(truncate_utf16(&exact, TITLE_MAX_UNITS), exact);
        assert_eq!(truncate_utf16("", TITLE_MAX_UNITS), "");
    }

    #[test]
    fn test_truncate_counts_utf16_units() {
        // 'é' is one UTF-16 unit but two UTF-8 bytes.
        let accented = "é".repeat(120);
        let cut = truncate_utf16(&accented, TITLE_MAX_UNITS);
        assert_eq!(cut.chars().count(), 100);
        assert_eq!(cut.encode_utf16().count(), 100);
    }

    #[test]
    fn test_truncate_never_splits_surrogate_pair() {
        // 99 ASCII units then an emoji needing two units.
        let input = format!("{}😀tail", "a".repeat(99));
        let cut = truncate_utf16(&input, TITLE_MAX_UNITS);
        assert_eq!(cut, "a".repeat(99));
    }

    #[test]
    fn test_search_request_omits_absent_limit() {
        let identity = Identity {
            user_key: "uk".into(),
            db_name: "db".into(),
            account: "acct".into(),
        };
        let body = SearchRequest {
            identity: &identity,
            query: "rust",
            limit: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"userKey": "uk", "dbName": "db", "account": "acct", "query": "rust"})
        );
    }

    #[test]
    fn test_hybrid_options_default_limit_is_unset() {
        let options = HybridSearchOptions::new("q");
        assert_eq!(options.limit, None);
        assert_eq!(options.with_limit(3).limit, Some(3));
    }
}
