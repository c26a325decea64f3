// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>

//! Namespace (database) management.
//!
//! A database is the logical partition of the remote vector store that every
//! other call addresses through `dbName`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::VektarisClient;
use crate::error::{Operation, Result};
use crate::types::CreateDatabaseOptions;

impl VektarisClient {
    /// Create the database named by the resolved `dbName`.
    ///
    /// # Errors
    ///
    /// Returns [`VektarisError::Validation`](crate::error::VektarisError::Validation)
    /// if `userKey`, `dbName`, or `account` cannot be resolved, or a transport
    /// error if the request fails.
    pub async fn create_database(&self, options: &CreateDatabaseOptions) -> Result<Value> {
        self.create_database_as(options).await
    }

    /// [`create_database`](Self::create_database), decoding the response into `T`.
    pub async fn create_database_as<T: DeserializeOwned>(
        &self,
        options: &CreateDatabaseOptions,
    ) -> Result<T> {
        let operation = Operation::CreateDatabase;
        let identity = self.identity(operation, &options.identity)?;
        self.send(operation, &identity).await
    }
}
