#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use crisol_api::auth::{generate_token, Claims, JwtVerifier};
use crisol_api::middleware::{OriginPolicy, WriteGate};
use crisol_api::state::AppState;
use crisol_api::store::memory::MemoryStore;
use crisol_api::store::{Document, DocumentStore, StoreError};

pub const TEST_SECRET: &str = "crisol-test-secret";

/// App over a fresh in-memory store.
pub fn test_app(simulation: bool) -> Router {
    app_with_store(Arc::new(MemoryStore::new()), simulation)
}

pub fn app_with_store(store: Arc<dyn DocumentStore>, simulation: bool) -> Router {
    crisol_api::app(AppState {
        store,
        verifier: Arc::new(JwtVerifier::new(TEST_SECRET)),
        write_gate: WriteGate::new(simulation),
        origin_policy: Arc::new(OriginPolicy::storefront_defaults()),
    })
}

pub fn admin_token() -> String {
    generate_token(&Claims::new(true, false, 1), TEST_SECRET).unwrap()
}

pub fn super_admin_token() -> String {
    generate_token(&Claims::new(true, true, 1), TEST_SECRET).unwrap()
}

/// Valid credential without the admin claim (superAdmin alone must not help).
pub fn non_admin_token() -> String {
    generate_token(&Claims::new(false, true, 1), TEST_SECRET).unwrap()
}

pub fn expired_admin_token() -> String {
    generate_token(&Claims::new(true, false, -1), TEST_SECRET).unwrap()
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

pub fn request(method: &str, path: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn json_request(method: &str, path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Drive one request through the router; JSON bodies decode, text bodies
/// come back as a JSON string.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// Store wrapper that counts every mutation and can fail the batch commit,
/// for asserting the zero-store-calls and atomicity properties.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryStore,
    pub adds: AtomicUsize,
    pub updates: AtomicUsize,
    pub deletes: AtomicUsize,
    pub batch_deletes: AtomicUsize,
    pub fail_batch: AtomicBool,
}

impl RecordingStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Insert fixture data without touching the mutation counters.
    pub async fn seed(&self, collection: &str, fields: Value) -> String {
        self.inner.add(collection, fields).await.unwrap()
    }

    pub fn writes(&self) -> usize {
        self.adds.load(Ordering::SeqCst)
            + self.updates.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
            + self.batch_deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get_all(&self, collection: &str) -> Result<Vec<Document>, StoreError> {
        self.inner.get_all(collection).await
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.inner.get(collection, id).await
    }

    async fn add(&self, collection: &str, fields: Value) -> Result<String, StoreError> {
        self.adds.fetch_add(1, Ordering::SeqCst);
        self.inner.add(collection, fields).await
    }

    async fn update(&self, collection: &str, id: &str, fields: Value) -> Result<(), StoreError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(collection, id).await
    }

    async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Vec<Document>, StoreError> {
        self.inner.query_eq(collection, field, value).await
    }

    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StoreError> {
        self.batch_deletes.fetch_add(1, Ordering::SeqCst);
        if self.fail_batch.load(Ordering::SeqCst) {
            // Commit refused: nothing below is touched, mirroring an
            // all-or-nothing batch that fails before applying.
            return Err(StoreError::Backend("injected commit failure".to_string()));
        }
        self.inner.delete_batch(collection, ids).await
    }
}
