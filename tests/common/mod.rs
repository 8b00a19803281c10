//! Shared utilities for integration testing.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// A captured submission request.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub token: String,
    pub body: String,
}

/// State backing the mock dispatch service.
pub struct MockState {
    /// Id handed out for accepted submissions.
    submission_id: String,
    /// When set, submissions are rejected with this HTTP status.
    reject_submissions_with: Option<u16>,
    /// Scripted status replies; the last entry repeats forever.
    statuses: Mutex<VecDeque<&'static str>>,
    status_calls: AtomicUsize,
    submissions: Mutex<Vec<CapturedRequest>>,
    status_requests: Mutex<Vec<CapturedRequest>>,
}

/// Mock dispatch service bound to an ephemeral local port.
pub struct MockTxd {
    pub addr: SocketAddr,
    state: Arc<MockState>,
}

impl MockTxd {
    /// Start a mock that accepts submissions under `id` and replays `statuses`.
    pub async fn start(id: &str, statuses: Vec<&'static str>) -> Self {
        Self::start_inner(id, statuses, None).await
    }

    /// Start a mock that rejects every submission with `status`.
    pub async fn start_rejecting(status: u16) -> Self {
        Self::start_inner("unused", Vec::new(), Some(status)).await
    }

    async fn start_inner(
        id: &str,
        statuses: Vec<&'static str>,
        reject_submissions_with: Option<u16>,
    ) -> Self {
        let state = Arc::new(MockState {
            submission_id: id.to_string(),
            reject_submissions_with,
            statuses: Mutex::new(statuses.into()),
            status_calls: AtomicUsize::new(0),
            submissions: Mutex::new(Vec::new()),
            status_requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/v1/submission", post(handle_submission))
            .route("/api/v1/submission/{id}", get(handle_status))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn base_url(&self) -> url::Url {
        url::Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    pub fn status_calls(&self) -> usize {
        self.state.status_calls.load(Ordering::SeqCst)
    }

    pub fn submissions(&self) -> Vec<CapturedRequest> {
        self.state.submissions.lock().unwrap().clone()
    }

    pub fn status_requests(&self) -> Vec<CapturedRequest> {
        self.state.status_requests.lock().unwrap().clone()
    }
}

fn bearer_token(headers: &HeaderMap) -> String {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default()
        .to_string()
}

async fn handle_submission(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, Json<Value>) {
    state.submissions.lock().unwrap().push(CapturedRequest {
        token: bearer_token(&headers),
        body,
    });

    if let Some(status) = state.reject_submissions_with {
        let status = StatusCode::from_u16(status).unwrap();
        return (status, Json(json!({ "error": "submission rejected" })));
    }

    (StatusCode::OK, Json(json!({ "id": state.submission_id })))
}

async fn handle_status(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    state.status_calls.fetch_add(1, Ordering::SeqCst);
    state.status_requests.lock().unwrap().push(CapturedRequest {
        token: bearer_token(&headers),
        body: id,
    });

    let mut statuses = state.statuses.lock().unwrap();
    let status = if statuses.len() > 1 {
        statuses.pop_front().unwrap()
    } else {
        statuses.front().copied().unwrap_or("Pending")
    };

    (StatusCode::OK, Json(json!({ "status": status })))
}
