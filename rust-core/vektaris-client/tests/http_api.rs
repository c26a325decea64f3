// SPDX-License-Identifier: PMPL-1.0-or-later
//! Wire-level tests for the Vektaris client.
//!
//! Each test runs an axum server on an ephemeral localhost port and drives
//! the real `reqwest` transport against it.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use vektaris_client::types::{
    CreateDatabaseOptions, GetEmbeddingsOptions, HybridSearchOptions, QueryEmbeddingsOptions,
    StoreEmbeddingOptions,
};
use vektaris_client::{ClientConfig, ErrorKind, TransportError, VektarisClient, VektarisError};

/// One request as seen by the test server.
#[derive(Debug, Clone)]
struct Recorded {
    op: String,
    content_type: Option<String>,
    body: Value,
}

type Log = Arc<Mutex<Vec<Recorded>>>;

async fn record(
    State(log): State<Log>,
    Path(op): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    log.lock().unwrap().push(Recorded {
        op: op.clone(),
        content_type,
        body: body.clone(),
    });
    Json(json!({"op": op, "received": body}))
}

/// Start `app` on 127.0.0.1 and return its base URL.
async fn spawn(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn recording_server(prefix: &str) -> (String, Log) {
    let log: Log = Arc::default();
    let app = Router::new()
        .route(&format!("{prefix}/{{op}}"), post(record))
        .with_state(log.clone());
    (spawn(app).await, log)
}

fn config(base_url: &str) -> ClientConfig {
    ClientConfig::new()
        .with_base_url(base_url)
        .with_user_key("uk-1")
        .with_db_name("articles")
        .with_account("0xabc")
}

#[tokio::test]
async fn test_all_operations_post_json_to_fixed_paths() {
    let (base_url, log) = recording_server("").await;
    let client = VektarisClient::new(config(&base_url)).unwrap();

    let created = client
        .create_database(&CreateDatabaseOptions::new())
        .await
        .unwrap();
    client
        .store_embedding(&StoreEmbeddingOptions::new("Title", "Body text"))
        .await
        .unwrap();
    client
        .query_embeddings(&QueryEmbeddingsOptions::new("body"))
        .await
        .unwrap();
    client
        .get_embeddings(&GetEmbeddingsOptions::new(0, 20))
        .await
        .unwrap();
    client
        .hybrid_search(&HybridSearchOptions::new("body"))
        .await
        .unwrap();

    let identity = json!({"userKey": "uk-1", "dbName": "articles", "account": "0xabc"});
    assert_eq!(created, json!({"op": "createDatabase", "received": identity}));

    let log = log.lock().unwrap().clone();
    let ops: Vec<&str> = log.iter().map(|r| r.op.as_str()).collect();
    assert_eq!(
        ops,
        vec!["createDatabase", "storeEmbedding", "queryEmbeddings", "getEmbeddings", "hybridSearch"]
    );
    for recorded in &log {
        assert_eq!(recorded.content_type.as_deref(), Some("application/json"));
        assert_eq!(recorded.body["userKey"], "uk-1");
        assert_eq!(recorded.body["dbName"], "articles");
        assert_eq!(recorded.body["account"], "0xabc");
    }
    assert_eq!(log[1].body["title"], "Title");
    assert_eq!(log[1].body["content"], "Body text");
    assert!(log[2].body.get("limit").is_none());
    assert_eq!(log[3].body["start"], 0);
    assert_eq!(log[3].body["limit"], 20);
    assert_eq!(log[4].body["limit"], 10);
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let (base_url, log) = recording_server("/api/v1").await;
    let client = VektarisClient::new(config(&format!("{base_url}/api/v1"))).unwrap();

    client
        .create_database(&CreateDatabaseOptions::new())
        .await
        .unwrap();

    assert_eq!(log.lock().unwrap()[0].op, "createDatabase");
}

#[tokio::test]
async fn test_base_url_query_string_is_kept_after_path() {
    let (base_url, log) = recording_server("/api").await;
    let client = VektarisClient::new(config(&format!("{base_url}/api?tenant=x"))).unwrap();

    let response = client
        .get_embeddings(&GetEmbeddingsOptions::new(0, 5))
        .await
        .unwrap();

    assert_eq!(response["op"], "getEmbeddings");
    assert_eq!(log.lock().unwrap()[0].op, "getEmbeddings");
}

#[tokio::test]
async fn test_error_status_surfaces_body_message() {
    let app = Router::new().route(
        "/{op}",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"message": "invalid user key"})),
            )
        }),
    );
    let base_url = spawn(app).await;
    let client = VektarisClient::new(config(&base_url)).unwrap();

    let err = client
        .hybrid_search(&HybridSearchOptions::new("q"))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "hybridSearch error: Request failed with status code 401: invalid user key"
    );
    match err {
        VektarisError::Transport { source, .. } => assert_eq!(source.status(), Some(401)),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_error_status_without_json_body() {
    let app = Router::new().route(
        "/{op}",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base_url = spawn(app).await;
    let client = VektarisClient::new(config(&base_url)).unwrap();

    let err = client
        .get_embeddings(&GetEmbeddingsOptions::new(0, 1))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "getEmbeddings error: Request failed with status code 500"
    );
}

#[tokio::test]
async fn test_non_json_success_body_is_transport_error() {
    let app = Router::new().route("/{op}", post(|| async { "plain text" }));
    let base_url = spawn(app).await;
    let client = VektarisClient::new(config(&base_url)).unwrap();

    let err = client
        .query_embeddings(&QueryEmbeddingsOptions::new("q"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    assert!(err.to_string().starts_with("queryEmbeddings error: invalid JSON response"));
}

#[tokio::test]
async fn test_connection_refused_is_prefixed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = VektarisClient::new(config(&format!("http://{addr}"))).unwrap();
    let err = client
        .store_embedding(&StoreEmbeddingOptions::new("t", "c"))
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("storeEmbedding error: "));
    match err {
        VektarisError::Transport {
            source: TransportError::Request(_),
            ..
        } => {}
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_validation_failure_never_reaches_server() {
    let (base_url, log) = recording_server("").await;
    let client = VektarisClient::new(ClientConfig::new().with_base_url(base_url)).unwrap();

    let err = client
        .create_database(&CreateDatabaseOptions::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(log.lock().unwrap().is_empty());
}
