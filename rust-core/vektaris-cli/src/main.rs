// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <j.d.a.jewell@open.ac.uk>
//!
//! vektaris — command-line front end for the Vektaris API.
//!
//! Flags override `VEKTARIS_*` environment variables, which may also come
//! from a `.env` file in the working directory. Responses are printed as
//! JSON on stdout.

use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use vektaris_client::types::{
    CreateDatabaseOptions, GetEmbeddingsOptions, HybridSearchOptions, QueryEmbeddingsOptions,
    StoreEmbeddingOptions,
};
use vektaris_client::{ClientConfig, VektarisClient};

/// Vektaris version string, pulled from Cargo.toml at compile time.
const VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// CLI argument parsing
// ---------------------------------------------------------------------------

/// vektaris — talk to a Vektaris vector database.
#[derive(Parser, Debug)]
#[command(name = "vektaris", version = VERSION, about = "Vektaris API client")]
struct Cli {
    /// Base URL of the Vektaris API.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// User key sent with every request.
    #[arg(long, global = true)]
    user_key: Option<String>,

    /// Database (namespace) name.
    #[arg(long, global = true)]
    db_name: Option<String>,

    /// Account the database belongs to.
    #[arg(long, global = true)]
    account: Option<String>,

    /// Print single-line JSON instead of pretty output.
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create the database named by --db-name.
    CreateDatabase,
    /// Store one text item.
    StoreEmbedding {
        /// Title (cut to 100 characters).
        #[arg(long)]
        title: String,
        /// Content to embed (cut to 500 characters).
        #[arg(long)]
        content: String,
    },
    /// Semantic search.
    Query {
        #[arg(long)]
        query: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Fetch a page of stored embeddings.
    Get {
        #[arg(long)]
        start: u64,
        #[arg(long)]
        limit: u64,
    },
    /// Hybrid keyword and vector search.
    HybridSearch {
        #[arg(long)]
        query: String,
        /// Defaults to 10.
        #[arg(long)]
        limit: Option<u32>,
    },
}

impl Cli {
    /// Flags first, then the environment.
    fn config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            user_key: self.user_key.clone(),
            db_name: self.db_name.clone(),
            account: self.account.clone(),
            timeout: None,
        }
        .with_env_defaults()
    }
}

async fn run(cli: &Cli, client: &VektarisClient) -> vektaris_client::Result<Value> {
    match &cli.command {
        Command::CreateDatabase => client.create_database(&CreateDatabaseOptions::new()).await,
        Command::StoreEmbedding { title, content } => {
            client
                .store_embedding(&StoreEmbeddingOptions::new(title, content))
                .await
        }
        Command::Query { query, limit } => {
            let mut options = QueryEmbeddingsOptions::new(query);
            options.limit = *limit;
            client.query_embeddings(&options).await
        }
        Command::Get { start, limit } => {
            client
                .get_embeddings(&GetEmbeddingsOptions::new(*start, *limit))
                .await
        }
        Command::HybridSearch { query, limit } => {
            let mut options = HybridSearchOptions::new(query);
            options.limit = *limit;
            client.hybrid_search(&options).await
        }
    }
}

/// Run the selected command and print its outcome. Operation failures go
/// to stderr and map to a failing exit code.
async fn dispatch(cli: &Cli, client: &VektarisClient) -> anyhow::Result<ExitCode> {
    let response = match run(cli, client).await {
        Ok(response) => response,
        Err(err) => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let rendered = if cli.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{rendered}");

    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = VektarisClient::new(cli.config()).context("failed to build client")?;
    tracing::debug!(?client, "client ready");

    dispatch(&cli, &client).await
}
