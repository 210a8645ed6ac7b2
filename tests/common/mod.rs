//! Common test utilities
//!
//! - In-process requests against the router
//! - A live server on an ephemeral port for the cable and the client

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use xfdocs::backend::routes::router::create_router;
use xfdocs::backend::server::AppState;
use xfdocs::client::Config;
use xfdocs::shared::AppConfig;

/// Router over a fresh in-memory store
pub fn test_app() -> (Router, AppState) {
    let state = AppState::in_memory(64);
    (create_router(state.clone()), state)
}

/// Send one request through the router and collect the response body
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub fn json(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| panic!("invalid JSON {:?}: {}", text, e))
}

/// A server listening on 127.0.0.1 with an in-memory store
pub struct TestServer {
    pub state: AppState,
    pub config: Config,
    task: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        let state = AppState::in_memory(64);
        let app = create_router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let task = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = Config::with_builder(AppConfig::builder().server_url(format!("http://{}", addr)))
            .unwrap();

        Self { state, config, task }
    }

    /// Wait until `count` cable connections are subscribed
    pub async fn wait_for_subscribers(&self, count: usize) {
        tokio::time::timeout(std::time::Duration::from_secs(5), async {
            while self.state.channel.subscriber_count() < count {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("cable subscribers did not connect");
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
