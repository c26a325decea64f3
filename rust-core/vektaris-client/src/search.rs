// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Semantic and hybrid search.
//!
//! Both searches forward a text query; ranking happens server-side. They
//! differ in their `limit` default: semantic queries send no limit unless
//! one is given, hybrid search sends [`DEFAULT_HYBRID_LIMIT`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::VektarisClient;
use crate::config::IdentityOverrides;
use crate::error::{Operation, Result, VektarisError};
use crate::types::{HybridSearchOptions, QueryEmbeddingsOptions, SearchRequest, DEFAULT_HYBRID_LIMIT};

impl VektarisClient {
    /// Semantic (vector similarity) search over stored embeddings.
    ///
    /// # Errors
    ///
    /// Returns [`VektarisError::Validation`] if the identity cannot be
    /// resolved or `query` is empty.
    pub async fn query_embeddings(&self, options: &QueryEmbeddingsOptions) -> Result<Value> {
        self.query_embeddings_as(options).await
    }

    /// [`query_embeddings`](Self::query_embeddings), decoding the response into `T`.
    pub async fn query_embeddings_as<T: DeserializeOwned>(
        &self,
        options: &QueryEmbeddingsOptions,
    ) -> Result<T> {
        self.search(Operation::QueryEmbeddings, &options.identity, &options.query, options.limit)
            .await
    }

    /// Hybrid (keyword plus vector) search over stored embeddings.
    ///
    /// `limit` defaults to 10.
    pub async fn hybrid_search(&self, options: &HybridSearchOptions) -> Result<Value> {
        self.hybrid_search_as(options).await
    }

    /// [`hybrid_search`](Self::hybrid_search), decoding the response into `T`.
    pub async fn hybrid_search_as<T: DeserializeOwned>(
        &self,
        options: &HybridSearchOptions,
    ) -> Result<T> {
        let limit = options.limit.unwrap_or(DEFAULT_HYBRID_LIMIT);
        self.search(Operation::HybridSearch, &options.identity, &options.query, Some(limit))
            .await
    }

    async fn search<T: DeserializeOwned>(
        &self,
        operation: Operation,
        overrides: &IdentityOverrides,
        query: &str,
        limit: Option<u32>,
    ) -> Result<T> {
        let identity = self.identity(operation, overrides)?;
        if query.is_empty() {
            return Err(VektarisError::missing(operation, vec!["query"]));
        }

        let body = SearchRequest {
            identity: &identity,
            query,
            limit,
        };
        self.send(operation, &body).await
    }
}
