//! A mock Fieldbook API served by axum on an ephemeral port.

#![allow(dead_code)]

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use base64::Engine;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BOOK: &str = "test-book";
pub const KEY: &str = "test-key";
pub const SECRET: &str = "test-secret";

#[derive(Clone, Default)]
pub struct MockFieldbook {
    pub records: Arc<Mutex<Vec<Value>>>,
    /// Number of requests answered with `fail_status` before behaving.
    pub failures_left: Arc<AtomicUsize>,
    pub fail_status: u16,
    /// Answer list requests with a body that is not JSON.
    pub junk: bool,
    pub calls: Arc<AtomicUsize>,
}

impl MockFieldbook {
    pub fn with_records(records: Vec<Value>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            ..Self::default()
        }
    }

    pub fn failing(mut self, status: u16, times: usize) -> Self {
        self.fail_status = status;
        self.failures_left = Arc::new(AtomicUsize::new(times));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> Vec<Value> {
        self.records.lock().unwrap().clone()
    }

    /// Serve on 127.0.0.1 and return the base URL (`http://addr/v1`).
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route(&format!("/v1/{}/words", BOOK), get(list).post(create))
            .route(&format!("/v1/{}/words/{{id}}", BOOK), put(update))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }
}

pub fn record(id: u64, word: &str, status: &str) -> Value {
    json!({"id": id, "record_url": "", "word": word, "how_well_known": status})
}

/// Config TOML pointing at `base_url` with the mock's credentials.
pub fn config_toml(base_url: &str, max_retries: u32) -> String {
    format!(
        "[fieldbook]\nbook = \"{}\"\nkey = \"{}\"\nsecret = \"{}\"\nbase_url = \"{}\"\nmax_retries = {}\ntimeout_secs = 5\n",
        BOOK, KEY, SECRET, base_url, max_retries
    )
}

fn guard(mock: &MockFieldbook, headers: &HeaderMap) -> Option<Response> {
    mock.calls.fetch_add(1, Ordering::SeqCst);

    let expected = format!(
        "Basic {}",
        base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", KEY, SECRET))
    );
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if auth != expected {
        return Some((StatusCode::UNAUTHORIZED, "bad credentials").into_response());
    }

    let left = mock.failures_left.load(Ordering::SeqCst);
    if left > 0 {
        mock.failures_left.store(left - 1, Ordering::SeqCst);
        let status = StatusCode::from_u16(mock.fail_status).unwrap();
        return Some((status, "injected failure").into_response());
    }
    None
}

async fn list(State(mock): State<MockFieldbook>, headers: HeaderMap) -> Response {
    if let Some(resp) = guard(&mock, &headers) {
        return resp;
    }
    if mock.junk {
        return (StatusCode::OK, "<html>not json</html>").into_response();
    }
    Json(Value::Array(mock.snapshot())).into_response()
}

async fn create(
    State(mock): State<MockFieldbook>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if let Some(resp) = guard(&mock, &headers) {
        return resp;
    }
    let mut records = mock.records.lock().unwrap();
    let id = records.len() as u64 + 1;
    let rec = json!({
        "id": id,
        "record_url": format!("https://fieldbook.example/{}/{}", BOOK, id),
        "word": body["word"],
        "how_well_known": body["how_well_known"],
    });
    records.push(rec.clone());
    (StatusCode::CREATED, Json(rec)).into_response()
}

async fn update(
    State(mock): State<MockFieldbook>,
    headers: HeaderMap,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(resp) = guard(&mock, &headers) {
        return resp;
    }
    let mut records = mock.records.lock().unwrap();
    match records.iter_mut().find(|r| r["id"] == id) {
        Some(rec) => {
            rec["how_well_known"] = body["how_well_known"].clone();
            Json(rec.clone()).into_response()
        }
        None => (StatusCode::NOT_FOUND, "no such record").into_response(),
    }
}
