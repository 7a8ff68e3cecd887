//! Shared utilities for integration testing.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Router,
};
use crowdsec_bouncer::config::BouncerConfig;
use crowdsec_bouncer::HttpServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-api-key";

/// What the mock Local API saw for one lookup.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedLookup {
    pub query: HashMap<String, String>,
    pub api_key: Option<String>,
}

type Responder = dyn Fn() -> (StatusCode, String) + Send + Sync;

#[derive(Clone)]
struct MockState {
    responder: Arc<Responder>,
    delay: Duration,
    lookups: Arc<Mutex<Vec<RecordedLookup>>>,
    hits: Arc<AtomicUsize>,
}

/// A running mock of `GET /v1/decisions`.
pub struct MockLapi {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    lookups: Arc<Mutex<Vec<RecordedLookup>>>,
}

#[allow(dead_code)]
impl MockLapi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn last_lookup(&self) -> Option<RecordedLookup> {
        self.lookups.lock().unwrap().last().cloned()
    }
}

async fn decisions(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    state.hits.fetch_add(1, Ordering::SeqCst);
    state.lookups.lock().unwrap().push(RecordedLookup {
        query,
        api_key: headers
            .get("x-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.responder)()
}

/// Start a mock Local API answering every lookup with `status` and `body`.
#[allow(dead_code)]
pub async fn start_mock_lapi(status: u16, body: &'static str) -> MockLapi {
    start_programmable_lapi(Duration::ZERO, move || {
        (StatusCode::from_u16(status).unwrap(), body.to_string())
    })
    .await
}

/// Start a mock Local API with a custom responder and response delay.
pub async fn start_programmable_lapi<F>(delay: Duration, responder: F) -> MockLapi
where
    F: Fn() -> (StatusCode, String) + Send + Sync + 'static,
{
    let hits = Arc::new(AtomicUsize::new(0));
    let lookups = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        responder: Arc::new(responder),
        delay,
        lookups: lookups.clone(),
        hits: hits.clone(),
    };

    let app = Router::new()
        .route("/v1/decisions", get(decisions))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    MockLapi {
        addr,
        hits,
        lookups,
    }
}

/// Start a raw upstream that promises a 100-byte body, sends two bytes
/// and closes the connection.
#[allow(dead_code)]
pub async fn start_truncated_lapi() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        // Consume the request head so closing does not reset the connection.
                        let mut head = Vec::new();
                        let mut buf = [0u8; 1024];
                        while !head.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut buf).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => head.extend_from_slice(&buf[..n]),
                            }
                        }
                        let _ = socket
                            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\n\r\n[]")
                            .await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

pub fn bouncer_config(lapi_host: &str) -> BouncerConfig {
    let mut config = BouncerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.lapi.api_key = TEST_API_KEY.to_string();
    config.lapi.host = lapi_host.to_string();
    config.lapi.timeout_secs = 2;
    config
}

#[allow(dead_code)]
pub fn bouncer(config: BouncerConfig) -> HttpServer {
    HttpServer::new(config, None).unwrap()
}

/// Send one forward-auth request through the router.
#[allow(dead_code)]
pub async fn forward_auth(server: &HttpServer, real_ip: Option<&str>) -> axum::response::Response {
    let mut request = Request::builder().uri("/api/v1/forwardAuth");
    if let Some(ip) = real_ip {
        request = request.header("X-Real-Ip", ip);
    }
    server
        .router()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn get_path(server: &HttpServer, path: &str) -> axum::response::Response {
    server
        .router()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
