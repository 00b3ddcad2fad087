//! Stub collaborator service for HTTP adapter tests
//!
//! An axum router that serves canned responses by request path and records
//! every request it receives.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Canned response
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
}

impl StubResponse {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            content_type: "application/json",
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn bytes(body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: "application/octet-stream",
            body: body.to_vec(),
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.as_bytes().to_vec(),
        }
    }
}

impl IntoResponse for StubResponse {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap();
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Recorded request
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl StubRequest {
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

struct StubState {
    routes: HashMap<String, StubResponse>,
    requests: Mutex<Vec<StubRequest>>,
}

impl StubState {
    /// Exact path match, else a `/prefix/*` route covering the path
    fn route(&self, path: &str) -> Option<StubResponse> {
        self.routes.get(path).cloned().or_else(|| {
            self.routes
                .iter()
                .filter_map(|(pattern, response)| {
                    pattern
                        .strip_suffix('*')
                        .filter(|prefix| path.starts_with(prefix))
                        .map(|_| response.clone())
                })
                .next()
        })
    }
}

async fn serve_stub(
    State(state): State<Arc<StubState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> StubResponse {
    let response = state
        .route(uri.path())
        .unwrap_or_else(|| StubResponse::status(404, "not found"));

    state.requests.lock().unwrap().push(StubRequest {
        method,
        uri,
        headers,
        body: body.to_vec(),
    });

    response
}

pub struct StubServer {
    pub base_url: String,
    state: Arc<StubState>,
}

impl StubServer {
    /// Start serving `routes` (path or `/prefix/*` → response); other paths answer 404
    pub async fn start(routes: Vec<(&str, StubResponse)>) -> Self {
        let state = Arc::new(StubState {
            routes: routes
                .into_iter()
                .map(|(path, response)| (path.to_string(), response))
                .collect(),
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(serve_stub)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, state }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn requests(&self) -> Vec<StubRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}
