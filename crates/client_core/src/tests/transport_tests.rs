use super::*;

use std::{sync::Mutex, time::Duration};

use axum::{
    extract::Path,
    http::{HeaderMap as AxumHeaders, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl RecordingObserver {
    fn events(&self) -> Vec<String> {
        self.events.lock().expect("events").clone()
    }
}

impl TransportObserver for RecordingObserver {
    fn on_request(&self, method: &Method, url: &str) {
        self.events
            .lock()
            .expect("events")
            .push(format!("request {method} {url}"));
    }

    fn on_response(&self, method: &Method, url: &str, status: u16, body: &Value) {
        self.events
            .lock()
            .expect("events")
            .push(format!("response {method} {url} {status} {body}"));
    }

    fn on_failure(&self, method: &Method, url: &str, error: &ClientError) {
        self.events
            .lock()
            .expect("events")
            .push(format!("failure {method} {url} {error}"));
    }
}

async fn spawn_backend() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/api/plans", get(|| async { Json(json!([{ "id": "p1" }])) }))
        .route(
            "/api/settings",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "detail": "Settings not found" })),
                )
            }),
        )
        .route(
            "/api/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                Json(json!({ "late": true }))
            }),
        )
        .route("/api/empty", get(|| async { StatusCode::NO_CONTENT }))
        .route("/api/text", get(|| async { "definitely not json" }))
        .route(
            "/api/crash",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/api/echo",
            post(|headers: AxumHeaders, Json(body): Json<Value>| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({ "received": body, "content_type": content_type }))
            }),
        )
        .route(
            "/api/trial/:email",
            get(|Path(email): Path<String>| async move { Json(json!({ "email": email })) }),
        );
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn transport_for(
    backend_url: &str,
    timeout_ms: u64,
) -> (HttpTransport, Arc<RecordingObserver>) {
    let settings = ClientSettings {
        backend_url: Some(backend_url.to_string()),
        ..ClientSettings::default()
    };
    let config = TransportConfig::from_settings(&settings)
        .expect("config")
        .with_timeout(Duration::from_millis(timeout_ms));
    let observer = Arc::new(RecordingObserver::default());
    let transport = HttpTransport::new(config, observer.clone()).expect("transport");
    (transport, observer)
}

#[tokio::test]
async fn get_returns_decoded_body_and_notifies_observer() {
    let backend = spawn_backend().await;
    let (transport, observer) = transport_for(&backend, 2_000);

    let body = transport.get("/plans").await.expect("plans");
    assert_eq!(body, json!([{ "id": "p1" }]));

    let events = observer.events();
    assert_eq!(events.len(), 2, "{events:?}");
    assert_eq!(events[0], format!("request GET {backend}/api/plans"));
    assert!(events[1].starts_with(&format!("response GET {backend}/api/plans 200")));
}

#[tokio::test]
async fn non_success_status_carries_payload() {
    let backend = spawn_backend().await;
    let (transport, observer) = transport_for(&backend, 2_000);

    let err = transport.get("/settings").await.expect_err("must fail");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Settings not found");
    assert!(observer.events()[1].starts_with("failure GET"));
}

#[tokio::test]
async fn non_json_error_body_is_kept_as_text() {
    let backend = spawn_backend().await;
    let (transport, _observer) = transport_for(&backend, 2_000);

    match transport.get("/crash").await {
        Err(ClientError::Http { status, payload }) => {
            assert_eq!(status, 500);
            assert_eq!(payload, Some(Value::String("boom".into())));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn timeout_is_reported_as_network_error() {
    let backend = spawn_backend().await;
    let (transport, observer) = transport_for(&backend, 50);

    let err = transport.get("/slow").await.expect_err("must time out");
    assert!(err.is_timeout(), "{err:?}");
    assert!(observer.events()[1].starts_with("failure GET"));
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (transport, _observer) = transport_for(&format!("http://{addr}"), 2_000);
    let err = transport.get("/health").await.expect_err("must fail");
    assert!(matches!(err, ClientError::Network { .. }), "{err:?}");
}

#[tokio::test]
async fn empty_success_body_decodes_as_null() {
    let backend = spawn_backend().await;
    let (transport, _observer) = transport_for(&backend, 2_000);
    assert_eq!(transport.get("/empty").await.expect("empty"), Value::Null);
}

#[tokio::test]
async fn non_json_success_body_is_a_decode_error() {
    let backend = spawn_backend().await;
    let (transport, _observer) = transport_for(&backend, 2_000);
    let err = transport.get("/text").await.expect_err("must fail");
    assert!(matches!(err, ClientError::Decode { .. }), "{err:?}");
}

#[tokio::test]
async fn post_sends_json_body() {
    let backend = spawn_backend().await;
    let (transport, _observer) = transport_for(&backend, 2_000);

    let body = transport
        .post("/echo", json!({ "email": "x@y.com" }))
        .await
        .expect("echo");
    assert_eq!(body["received"], json!({ "email": "x@y.com" }));
    assert_eq!(body["content_type"], "application/json");
}

#[test]
fn from_settings_fails_fast_without_backend_url() {
    let err = HttpTransport::from_settings(&ClientSettings::default())
        .err()
        .expect("must fail");
    assert!(matches!(err, ClientError::Configuration(_)), "{err:?}");
}
