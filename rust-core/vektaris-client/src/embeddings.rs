// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Embedding storage and paginated retrieval.
//!
//! The server computes the embedding from `content`; the client only ships
//! text. Titles and content longer than the server-side limits are cut
//! before sending rather than rejected.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::client::VektarisClient;
use crate::error::{Operation, Result, VektarisError};
use crate::types::{
    truncate_utf16, GetEmbeddingsOptions, GetEmbeddingsRequest, StoreEmbeddingOptions,
    StoreEmbeddingRequest, CONTENT_MAX_UNITS, TITLE_MAX_UNITS,
};

impl VektarisClient {
    /// Store one piece of text under a title.
    ///
    /// `title` is cut to 100 and `content` to 500 UTF-16 code units before
    /// sending; nothing in the response reports the cut.
    ///
    /// # Errors
    ///
    /// Returns [`VektarisError::Validation`] if the identity cannot be
    /// resolved or `title` / `content` is empty.
    pub async fn store_embedding(&self, options: &StoreEmbeddingOptions) -> Result<Value> {
        self.store_embedding_as(options).await
    }

    /// [`store_embedding`](Self::store_embedding), decoding the response into `T`.
    pub async fn store_embedding_as<T: DeserializeOwned>(
        &self,
        options: &StoreEmbeddingOptions,
    ) -> Result<T> {
        let operation = Operation::StoreEmbedding;
        let identity = self.identity(operation, &options.identity)?;

        let missing: Vec<&'static str> = [
            ("title", options.title.is_empty()),
            ("content", options.content.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, empty)| empty.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(VektarisError::missing(operation, missing));
        }

        let title = truncate_utf16(&options.title, TITLE_MAX_UNITS);
        let content = truncate_utf16(&options.content, CONTENT_MAX_UNITS);
        if title.len() < options.title.len() || content.len() < options.content.len() {
            debug!(
                title_bytes = options.title.len(),
                content_bytes = options.content.len(),
                "truncating embedding fields"
            );
        }

        let body = StoreEmbeddingRequest {
            identity: &identity,
            title,
            content,
        };
        self.send(operation, &body).await
    }

    /// Store several items one after another, awaiting each request before
    /// sending the next.
    ///
    /// Stops at the first failure; items after it are not sent.
    pub async fn store_embeddings(&self, items: &[StoreEmbeddingOptions]) -> Result<Vec<Value>> {
        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.store_embedding(item).await?);
        }
        Ok(responses)
    }

    /// Fetch a page of stored embeddings.
    ///
    /// # Arguments
    ///
    /// * `options.start` — Pagination cursor, forwarded unchanged.
    /// * `options.limit` — Page size, forwarded unchanged.
    pub async fn get_embeddings(&self, options: &GetEmbeddingsOptions) -> Result<Value> {
        self.get_embeddings_as(options).await
    }

    /// [`get_embeddings`](Self::get_embeddings), decoding the response into `T`.
    pub async fn get_embeddings_as<T: DeserializeOwned>(
        &self,
        options: &GetEmbeddingsOptions,
    ) -> Result<T> {
        let operation = Operation::GetEmbeddings;
        let identity = self.identity(operation, &options.identity)?;
        let body = GetEmbeddingsRequest {
            identity: &identity,
            start: options.start,
            limit: options.limit,
        };
        self.send(operation, &body).await
    }
}
