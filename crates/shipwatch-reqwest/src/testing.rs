//! In-process HTTP servers for client tests.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE, HeaderName};
use serde_json::Value;
use tokio::net::TcpListener;

/// A request seen by [`capture`].
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// Shared log of captured requests.
#[derive(Debug, Clone, Default)]
pub struct Captured(Arc<Mutex<Vec<CapturedRequest>>>);

impl Captured {
    pub fn take(&self) -> Vec<CapturedRequest> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

/// Records the request and replies `200 {"message":"ok"}`.
pub async fn capture(
    State(captured): State<Captured>,
    headers: HeaderMap,
    body: String,
) -> &'static str {
    let header = |name: HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned)
    };

    captured.0.lock().unwrap().push(CapturedRequest {
        authorization: header(AUTHORIZATION),
        content_type: header(CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    r#"{"message":"ok"}"#
}

/// Serves `router` on an ephemeral local port.
pub async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Returns a local address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}
