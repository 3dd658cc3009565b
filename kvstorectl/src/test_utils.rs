//! Test utilities for CLI testing
//!
//! Provides an in-process mock of the kvstore gateway for integration testing,
//! plus in-memory fakes for driving the delete workflows without HTTP.

use anyhow::Result;
use async_trait::async_trait;
use axum::{extract::State, response::Json, routing::post, Router};
use kvstore_core::api::{
    ApiResponse, DeleteRangeRequest, DeleteRangeResponse, RangeRequest, RangeResponse,
    DELETE_RANGE_PATH, RANGE_PATH,
};
use kvstore_core::{KeyValue, KvError, ResponseHeader, StoreError};
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

use crate::del::DeleteReporter;
use crate::store::KvStore;

/// Mock store state
#[derive(Debug, Default)]
pub struct MockStoreState {
    /// Ordered keyspace
    pub data: BTreeMap<Vec<u8>, KeyValue>,
    /// Current store revision
    pub revision: i64,
    /// Number of range calls served
    pub range_calls: usize,
    /// Delete requests received, in arrival order
    pub delete_requests: Vec<DeleteRangeRequest>,
    /// Fail every delete once this many have succeeded
    pub fail_deletes_after: Option<usize>,
}

impl MockStoreState {
    /// Keys covered by `key`/`range_end`, using the store's range-end conventions.
    fn covered_keys(&self, key: &[u8], range_end: &[u8]) -> Vec<Vec<u8>> {
        if range_end.is_empty() {
            return self
                .data
                .get(key)
                .map(|kv| vec![kv.key.clone()])
                .unwrap_or_default();
        }

        let upper = if range_end == [0] {
            Bound::Unbounded
        } else if range_end <= key {
            return Vec::new();
        } else {
            Bound::Excluded(range_end.to_vec())
        };

        self.data
            .range((Bound::Included(key.to_vec()), upper))
            .map(|(k, _)| k.clone())
            .collect()
    }
}

/// Mock store implementation
#[derive(Debug, Clone, Default)]
pub struct MockStore {
    state: Arc<Mutex<MockStoreState>>,
    port: u16,
}

impl MockStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock store holding `keys`, each with value `value-<key>`
    pub fn with_keys(keys: &[&str]) -> Self {
        let store = Self::new();
        for key in keys {
            store.put(key.as_bytes(), format!("value-{}", key).as_bytes());
        }
        store
    }

    /// Insert or overwrite a pair
    pub fn put(&self, key: &[u8], value: &[u8]) {
        let mut state = self.state.lock().unwrap();
        state.revision += 1;
        let revision = state.revision;
        let entry = state
            .data
            .entry(key.to_vec())
            .or_insert_with(|| KeyValue {
                key: key.to_vec(),
                create_revision: revision,
                ..KeyValue::default()
            });
        entry.value = value.to_vec();
        entry.mod_revision = revision;
        entry.version += 1;
    }

    /// Start the mock store and return the address
    pub async fn start(mut self) -> Result<(Self, String)> {
        let app = self.create_router();

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        self.port = listener.local_addr()?.port();

        let server_url = format!("http://127.0.0.1:{}", self.port);

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("Mock store error: {}", e);
            }
        });

        // Give the server a moment to start and verify it's running
        for _ in 0..20 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        Ok((self, server_url))
    }

    /// Get the server port
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Remaining keys in ascending order
    pub fn keys(&self) -> Vec<Vec<u8>> {
        self.state.lock().unwrap().data.keys().cloned().collect()
    }

    /// Number of range calls served so far
    pub fn range_calls(&self) -> usize {
        self.state.lock().unwrap().range_calls
    }

    /// Delete requests received so far
    pub fn delete_requests(&self) -> Vec<DeleteRangeRequest> {
        self.state.lock().unwrap().delete_requests.clone()
    }

    /// Make every delete after the first `n` fail with an error envelope
    pub fn fail_deletes_after(&self, n: usize) {
        self.state.lock().unwrap().fail_deletes_after = Some(n);
    }

    /// Create the mock store router
    fn create_router(&self) -> Router {
        Router::new()
            .route(RANGE_PATH, post(range_handler))
            .route(DELETE_RANGE_PATH, post(delete_range_handler))
            .with_state(self.state.clone())
    }
}

// Handler functions

async fn range_handler(
    State(state): State<Arc<Mutex<MockStoreState>>>,
    Json(req): Json<RangeRequest>,
) -> Json<ApiResponse<RangeResponse>> {
    let mut state = state.lock().unwrap();
    state.range_calls += 1;

    let keys = state.covered_keys(&req.key, &req.range_end);
    let count = keys.len() as i64;
    let limit = if req.limit > 0 {
        req.limit as usize
    } else {
        keys.len()
    };
    let kvs = keys
        .iter()
        .take(limit)
        .filter_map(|k| state.data.get(k).cloned())
        .collect();

    Json(ApiResponse::success(RangeResponse {
        header: ResponseHeader {
            revision: state.revision,
        },
        kvs,
        count,
    }))
}

async fn delete_range_handler(
    State(state): State<Arc<Mutex<MockStoreState>>>,
    Json(req): Json<DeleteRangeRequest>,
) -> Json<ApiResponse<DeleteRangeResponse>> {
    let mut state = state.lock().unwrap();
    state.delete_requests.push(req.clone());

    if let Some(limit) = state.fail_deletes_after {
        if state.delete_requests.len() > limit {
            return Json(ApiResponse::error("injected delete failure".to_string()));
        }
    }

    let keys = state.covered_keys(&req.key, &req.range_end);
    let mut prev_kvs = Vec::new();
    for key in &keys {
        if let Some(kv) = state.data.remove(key) {
            if req.prev_kv {
                prev_kvs.push(kv);
            }
        }
    }
    if !keys.is_empty() {
        state.revision += 1;
    }

    Json(ApiResponse::success(DeleteRangeResponse {
        header: ResponseHeader {
            revision: state.revision,
        },
        deleted: keys.len() as i64,
        prev_kvs,
    }))
}

/// A call received by [`FakeStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(RangeRequest),
    Delete(DeleteRangeRequest),
}

/// In-memory store that records every call.
///
/// `get` ignores the requested range and returns all pairs in insertion
/// order, which lets tests control scan order directly.
#[derive(Debug, Default)]
pub struct FakeStore {
    kvs: Vec<KeyValue>,
    calls: Mutex<Vec<StoreCall>>,
    fail_get: bool,
    fail_delete_at: Option<usize>,
}

impl FakeStore {
    /// Pairs `key -> value-<key>` returned by `get` in the given order
    pub fn with_keys(keys: &[&str]) -> Self {
        Self {
            kvs: keys
                .iter()
                .map(|k| KeyValue::new(k.as_bytes(), format!("value-{}", k)))
                .collect(),
            ..Self::default()
        }
    }

    /// Fail the delete call with this zero-based index
    pub fn failing_delete_at(mut self, index: usize) -> Self {
        self.fail_delete_at = Some(index);
        self
    }

    /// Fail every get call
    pub fn failing_get(mut self) -> Self {
        self.fail_get = true;
        self
    }

    /// The error returned by injected failures
    pub fn injected_error() -> StoreError {
        StoreError::Server {
            endpoint: "fake".to_string(),
            message: "injected failure".to_string(),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> Vec<RangeRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Get(req) => Some(req),
                StoreCall::Delete(_) => None,
            })
            .collect()
    }

    pub fn delete_calls(&self) -> Vec<DeleteRangeRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                StoreCall::Delete(req) => Some(req),
                StoreCall::Get(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl KvStore for FakeStore {
    async fn get(&self, request: RangeRequest) -> Result<RangeResponse, StoreError> {
        self.calls.lock().unwrap().push(StoreCall::Get(request));
        if self.fail_get {
            return Err(Self::injected_error());
        }
        Ok(RangeResponse {
            header: ResponseHeader::default(),
            kvs: self.kvs.clone(),
            count: self.kvs.len() as i64,
        })
    }

    async fn delete(
        &self,
        request: DeleteRangeRequest,
    ) -> Result<DeleteRangeResponse, StoreError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(StoreCall::Delete(request.clone()));
            calls
                .iter()
                .filter(|c| matches!(c, StoreCall::Delete(_)))
                .count()
                - 1
        };
        if self.fail_delete_at == Some(index) {
            return Err(Self::injected_error());
        }

        let prev_kvs: Vec<KeyValue> = self
            .kvs
            .iter()
            .filter(|kv| kv.key == request.key)
            .cloned()
            .collect();
        Ok(DeleteRangeResponse {
            header: ResponseHeader::default(),
            deleted: prev_kvs.len() as i64,
            prev_kvs: if request.prev_kv { prev_kvs } else { Vec::new() },
        })
    }
}

/// An event observed by [`RecordingReporter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEvent {
    Found(Vec<u8>),
    Deleting(Vec<u8>),
    Deleted(i64),
}

/// Reporter that keeps every event in order
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<ReportEvent>,
    fail_deleted: bool,
}

impl RecordingReporter {
    /// Reporter whose `deleted` fails after recording the event
    pub fn failing() -> Self {
        Self {
            fail_deleted: true,
            ..Self::default()
        }
    }
}

impl DeleteReporter for RecordingReporter {
    fn found(&mut self, kv: &KeyValue) {
        self.events.push(ReportEvent::Found(kv.key.clone()));
    }

    fn deleting(&mut self, kv: &KeyValue) {
        self.events.push(ReportEvent::Deleting(kv.key.clone()));
    }

    fn deleted(&mut self, response: &DeleteRangeResponse) -> kvstore_core::Result<()> {
        self.events.push(ReportEvent::Deleted(response.deleted));
        if self.fail_deleted {
            return Err(KvError::Output("injected render failure".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_store_startup() {
        let (store, url) = MockStore::new().start().await.unwrap();

        assert!(store.port() > 0);
        assert!(url.contains(&store.port().to_string()));
    }

    #[test]
    fn test_covered_keys() {
        let store = MockStore::with_keys(&["a", "b", "c"]);
        let state = store.state.lock().unwrap();

        assert_eq!(state.covered_keys(b"b", b""), vec![b"b".to_vec()]);
        assert!(state.covered_keys(b"x", b"").is_empty());
        assert_eq!(
            state.covered_keys(b"a", b"c"),
            vec![b"a".to_vec(), b"b".to_vec()]
        );
        assert_eq!(state.covered_keys(&[0], &[0]).len(), 3);
    }

    #[test]
    fn test_put_tracks_revisions() {
        let store = MockStore::new();
        store.put(b"k", b"v1");
        store.put(b"k", b"v2");

        let state = store.state.lock().unwrap();
        let kv = state.data.get(b"k".as_slice()).unwrap();
        assert_eq!(kv.value, b"v2");
        assert_eq!(kv.create_revision, 1);
        assert_eq!(kv.mod_revision, 2);
        assert_eq!(kv.version, 2);
    }
}
