// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-process mock backend for tests.
//!
//! Serves canned JSON responses keyed by method and path (relative to
//! `/api/v1`) on an ephemeral localhost port, and records every request it
//! receives.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use url::Url;

use crate::config::ClientConfig;

const API_PREFIX: &str = "/api/v1";

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(Method, String), Canned>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub(crate) struct MockBackend {
    pub base_url: Url,
    state: Arc<MockState>,
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: Url::parse(&format!("http://{addr}{API_PREFIX}")).unwrap(),
            state,
        }
    }

    /// Client configuration pointing at this backend.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_request_timeout(Duration::from_secs(5))
    }

    pub fn config_with_data_dir(&self, dir: &Path) -> ClientConfig {
        self.config().with_data_dir(dir)
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        self.insert(method, path, status, body, None);
    }

    pub fn respond_after(
        &self,
        delay: Duration,
        method: Method,
        path: &str,
        status: u16,
        body: Value,
    ) {
        self.insert(method, path, status, body, Some(delay));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    fn insert(&self, method: Method, path: &str, status: u16, body: Value, delay: Option<Duration>) {
        let canned = Canned {
            status: StatusCode::from_u16(status).unwrap(),
            body,
            delay,
        };
        self.state
            .routes
            .lock()
            .unwrap()
            .insert((method, path.to_string()), canned);
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or(uri.path())
        .to_string();
    let authorization = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = if body.is_empty() {
        None
    } else {
        serde_json::from_slice(&body).ok()
    };

    state.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        authorization,
        body,
    });

    let canned = state.routes.lock().unwrap().get(&(method, path)).cloned();
    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            (canned.status, Json(canned.body)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({ "message": "no canned response" })))
            .into_response(),
    }
}
