// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! # Vektaris Client SDK
//!
//! A Rust client library for the Vektaris vector database HTTP API: create
//! namespaces, store text embeddings, and run semantic, hybrid, and paginated
//! queries. Indexing and ranking happen on the server; this crate builds
//! requests, applies default credentials, and normalises errors.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vektaris_client::client::VektarisClient;
//! use vektaris_client::config::ClientConfig;
//! use vektaris_client::types::{HybridSearchOptions, StoreEmbeddingOptions};
//!
//! #[tokio::main]
//! async fn main() -> vektaris_client::error::Result<()> {
//!     // Explicit values win; anything unset comes from VEKTARIS_* variables.
//!     let config = ClientConfig::new().with_db_name("articles").with_env_defaults();
//!     let client = VektarisClient::new(config)?;
//!
//!     client
//!         .store_embedding(&StoreEmbeddingOptions::new("Ownership", "Each value has one owner."))
//!         .await?;
//!     let hits = client.hybrid_search(&HybridSearchOptions::new("who owns a value")).await?;
//!     println!("{hits}");
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`client`] — Client construction, the shared default instance, and the request path.
//! - [`config`] — Layered configuration and per-call identity resolution.
//! - [`transport`] — The [`Transport`](transport::Transport) seam and its `reqwest` implementation.
//! - [`types`] — Operation options and wire request bodies.
//! - [`database`] — Namespace creation.
//! - [`embeddings`] — Embedding storage and paginated retrieval.
//! - [`search`] — Semantic and hybrid search.
//! - [`error`] — Error types and the crate-level `Result` alias.

pub mod client;
pub mod config;
pub mod transport;
pub mod types;
pub mod database;
pub mod embeddings;
pub mod search;
pub mod error;

pub use client::{shared, VektarisClient};
pub use config::{ClientConfig, IdentityOverrides};
pub use error::{ErrorKind, Operation, Result, TransportError, VektarisError};
