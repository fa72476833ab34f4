//! Common test helpers for endpoint tests.
//!
//! # Note
//!
//! The `#![allow(dead_code)]` attribute is necessary because Rust compiles each
//! integration test file as a separate crate, and not every file uses every helper.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use futures::FutureExt;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use getdub_api::api::{AppState, create_router};
use getdub_api::domain::{DocumentId, Record};
use getdub_api::infrastructure::{
    Document, DocumentRepository, RecordRepository, RepositoryError, RepositoryFuture,
};

// =============================================================================
// Application Helpers
// =============================================================================

/// Router over empty in-memory collections.
pub fn create_test_app() -> Router {
    create_router(AppState::in_memory())
}

/// Router whose every store call fails with a database error.
pub fn create_failing_app() -> Router {
    let failing = Arc::new(FailingRepository);
    create_router(AppState {
        records: failing.clone(),
        daily_records: failing.clone(),
        contacts: failing.clone(),
        ingredients: failing.clone(),
        recipes: failing,
    })
}

/// Sends one request and returns the status with the decoded JSON body.
///
/// A body that is not JSON decodes as `Value::Null`.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, None).await
}

/// Sends a raw, non-JSON body with a JSON content type.
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Reads the `_id` of a response document.
pub fn id_of(json: &Value) -> String {
    json["_id"].as_str().unwrap().to_string()
}

// =============================================================================
// Failing Repository
// =============================================================================

pub const STORE_FAILURE: &str = "connection reset by peer";

/// Repository whose every operation fails.
pub struct FailingRepository;

fn failure<T: Send + 'static>() -> RepositoryFuture<T> {
    futures::future::ready(Err(RepositoryError::DatabaseError(
        STORE_FAILURE.to_string(),
    )))
    .boxed()
}

impl<T: Document> DocumentRepository<T> for FailingRepository {
    fn find_by_id(&self, _id: &DocumentId) -> RepositoryFuture<Option<T>> {
        failure()
    }

    fn find_many(&self, _ids: &[DocumentId]) -> RepositoryFuture<Vec<T>> {
        failure()
    }

    fn insert(&self, _document: &T) -> RepositoryFuture<T> {
        failure()
    }

    fn update(&self, _id: &DocumentId, _changes: &T::Changes) -> RepositoryFuture<Option<T>> {
        failure()
    }

    fn delete(&self, _id: &DocumentId) -> RepositoryFuture<bool> {
        failure()
    }

    fn list(&self) -> RepositoryFuture<Vec<T>> {
        failure()
    }
}

impl RecordRepository for FailingRepository {
    fn find_by_transaction(&self, _transaction_id: &DocumentId) -> RepositoryFuture<Option<Record>> {
        failure()
    }
}
