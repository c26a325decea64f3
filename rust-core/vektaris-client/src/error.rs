// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Error types for the Vektaris client SDK.
//!
//! Every operation fails in one of two ways: locally, before any request is
//! sent ([`VektarisError::Validation`]), or in the HTTP exchange itself
//! ([`VektarisError::Transport`]). Both carry the [`Operation`] that failed,
//! and their `Display` output is the stable message callers match on:
//!
//! - `Missing required parameters to storeEmbedding.`
//! - `queryEmbeddings error: <transport message>`

use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// The five remote operations exposed by the Vektaris API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// `POST /createDatabase`
    CreateDatabase,
    /// `POST /storeEmbedding`
    StoreEmbedding,
    /// `POST /queryEmbeddings`
    QueryEmbeddings,
    /// `POST /getEmbeddings`
    GetEmbeddings,
    /// `POST /hybridSearch`
    HybridSearch,
}

impl Operation {
    /// Wire name of the operation, as used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            Operation::CreateDatabase => "createDatabase",
            Operation::StoreEmbedding => "storeEmbedding",
            Operation::QueryEmbeddings => "queryEmbeddings",
            Operation::GetEmbeddings => "getEmbeddings",
            Operation::HybridSearch => "hybridSearch",
        }
    }

    /// Request path, relative to the client's base URL.
    pub fn path(self) -> &'static str {
        match self {
            Operation::CreateDatabase => "/createDatabase",
            Operation::StoreEmbedding => "/storeEmbedding",
            Operation::QueryEmbeddings => "/queryEmbeddings",
            Operation::GetEmbeddings => "/getEmbeddings",
            Operation::HybridSearch => "/hybridSearch",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// TransportError
// ---------------------------------------------------------------------------

/// Failure reported by a [`Transport`](crate::transport::Transport).
///
/// The `Display` output of each variant is the bare message that ends up
/// after the `"<operation> error: "` prefix.
#[derive(Error, Debug)]
pub enum TransportError {
    /// Connection, TLS, timeout, or other failure inside `reqwest`.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("{message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message taken from the response body, or a generic status line.
        message: String,
    },

    /// The response body was not valid JSON.
    #[error("invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Free-form failure from a caller-supplied transport.
    #[error("{0}")]
    Message(String),
}

impl TransportError {
    /// HTTP status code, when the failure came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            TransportError::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether the failure was a request timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Request(err) if err.is_timeout())
    }
}

// ---------------------------------------------------------------------------
// VektarisError
// ---------------------------------------------------------------------------

/// Coarse classification of a [`VektarisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Raised locally; no request was sent.
    Validation,
    /// Raised by the HTTP exchange.
    Transport,
    /// Raised while constructing a client.
    Config,
}

/// Error type for Vektaris client operations.
#[derive(Error, Debug)]
pub enum VektarisError {
    /// Required identity or operation fields were missing or empty.
    #[error("Missing required parameters to {operation}.")]
    Validation {
        /// Operation that was rejected.
        operation: Operation,
        /// Wire names of the missing fields (e.g. `dbName`, `query`).
        missing: Vec<&'static str>,
    },

    /// The request was sent and failed.
    #[error("{operation} error: {source}")]
    Transport {
        /// Operation whose request failed.
        operation: Operation,
        /// Underlying transport failure.
        #[source]
        source: TransportError,
    },

    /// The client could not be constructed (bad base URL, TLS setup).
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl VektarisError {
    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            VektarisError::Validation { .. } => ErrorKind::Validation,
            VektarisError::Transport { .. } => ErrorKind::Transport,
            VektarisError::Config(_) => ErrorKind::Config,
        }
    }

    /// Operation that failed, if the error came from an operation call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            VektarisError::Validation { operation, .. }
            | VektarisError::Transport { operation, .. } => Some(*operation),
            VektarisError::Config(_) => None,
        }
    }

    pub(crate) fn missing(operation: Operation, missing: Vec<&'static str>) -> Self {
        VektarisError::Validation { operation, missing }
    }

    pub(crate) fn transport(operation: Operation, source: TransportError) -> Self {
        VektarisError::Transport { operation, source }
    }
}

/// Crate-level result alias using [`VektarisError`].
pub type Result<T> = std::result::Result<T, VektarisError>;
