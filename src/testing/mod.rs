//! Test doubles for the store and verifier seams, plus router helpers

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header::AUTHORIZATION, HeaderMap, Request, StatusCode},
    response::Response,
    Router,
};
use std::collections::HashMap;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use crate::app::{app, AppState};
use crate::auth::{AuthVerifier, Claims};
use crate::config::AppConfig;
use crate::database::{MemoryNoteStore, NewNote, Note, NoteStore, StoreError};

/// Memory store that counts every `put` and `query`
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryNoteStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.is_empty().await
    }
}

#[async_trait]
impl NoteStore for CountingStore {
    async fn put(&self, note: NewNote) -> Result<Note, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(note).await
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.query(owner_id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Store whose every operation fails
pub struct FailingStore;

#[async_trait]
impl NoteStore for FailingStore {
    async fn put(&self, _note: NewNote) -> Result<Note, StoreError> {
        Err(StoreError::Unavailable("simulated store outage".to_string()))
    }

    async fn query(&self, _owner_id: &str) -> Result<Vec<Note>, StoreError> {
        Err(StoreError::Unavailable("simulated store outage".to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("simulated store outage".to_string()))
    }
}

/// Store that panics on every read and write
pub struct PanickingStore;

#[async_trait]
impl NoteStore for PanickingStore {
    async fn put(&self, note: NewNote) -> Result<Note, StoreError> {
        panic!("corrupt partition for {}", note.owner_id);
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        panic!("corrupt partition for {}", owner_id);
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Memory store that sleeps before answering reads
pub struct SlowStore {
    inner: MemoryNoteStore,
    delay: Duration,
}

impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: MemoryNoteStore::new(),
            delay,
        }
    }
}

#[async_trait]
impl NoteStore for SlowStore {
    async fn put(&self, note: NewNote) -> Result<Note, StoreError> {
        self.inner.put(note).await
    }

    async fn query(&self, owner_id: &str) -> Result<Vec<Note>, StoreError> {
        tokio::time::sleep(self.delay).await;
        self.inner.query(owner_id).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}

/// Verifier backed by a fixed token table
#[derive(Default)]
pub struct StaticVerifier {
    tokens: HashMap<String, Claims>,
}

impl StaticVerifier {
    pub fn with_token(mut self, token: &str, claims: Claims) -> Self {
        self.tokens.insert(token.to_string(), claims);
        self
    }
}

#[async_trait]
impl AuthVerifier for StaticVerifier {
    async fn verify(&self, headers: &HeaderMap) -> Option<Claims> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = value.strip_prefix("Bearer ")?;
        self.tokens.get(token).cloned()
    }
}

/// Router over `store` with three known callers:
/// `alice-token` (u1, named Alice), `email-token` (u2, email only), `bob-token` (u3, bare)
pub fn test_app(store: Arc<dyn NoteStore>) -> Router {
    test_app_with_config(store, &AppConfig::development())
}

pub fn test_app_with_config(store: Arc<dyn NoteStore>, config: &AppConfig) -> Router {
    let verifier = StaticVerifier::default()
        .with_token("alice-token", Claims::new("u1").with_name("Alice"))
        .with_token("email-token", Claims::new("u2").with_email("a@x.com"))
        .with_token("bob-token", Claims::new("u3"));

    let state = Arc::new(AppState::new(store, Arc::new(verifier)));
    app(state, config)
}

/// Drive one request through the router
pub async fn respond(app: &Router, request: Request<Body>) -> Response {
    app.clone()
        .oneshot(request)
        .await
        .expect("router is infallible")
}

/// Drive one request through the router and collect the body as text
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = respond(app, request).await;

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");

    (status, String::from_utf8_lossy(&bytes).into_owned())
}

/// In-memory log sink for asserting on what a request wrote to the log
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer poisoned").extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_verifier_matches_known_tokens() {
        let verifier = StaticVerifier::default().with_token("t", Claims::new("u1"));

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer t".parse().unwrap());
        assert_eq!(verifier.verify(&headers).await, Some(Claims::new("u1")));

        headers.insert(AUTHORIZATION, "Bearer other".parse().unwrap());
        assert_eq!(verifier.verify(&headers).await, None);
    }

    #[tokio::test]
    async fn counting_store_counts_reads_and_writes() {
        let store = CountingStore::new();
        store
            .put(NewNote {
                owner_id: "u1".to_string(),
                friendly_id: None,
                message: "m".to_string(),
                created: None,
            })
            .await
            .unwrap();
        store.query("u1").await.unwrap();

        assert_eq!(store.calls(), 2);
    }
}
