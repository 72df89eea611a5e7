//! Tests for the logging filter: bodies must pass through byte-for-byte and
//! every exchange must be logged from start to end.

use std::convert::Infallible;
use std::io;
use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::{Body, Bytes, HttpBody},
    http::{HeaderMap, HeaderValue, Request, StatusCode, Uri},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use futures_util::stream;
use http_body::Frame;
use http_body_util::{BodyExt, StreamBody};
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use super::{log_exchange, query_params};

/// Echo the request body back, with a marker header.
async fn echo(body: Bytes) -> impl IntoResponse {
    ([("x-echo", "1")], body)
}

/// Stream a response in several chunks, like an SSE writer would.
async fn chunked() -> Body {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"data: one\n\n")),
        Ok(Bytes::from_static(b"data: \xe4\xb8\xad\n\n")),
        Ok(Bytes::from_static(b"")),
        Ok(Bytes::from_static(b"data: \xff\xfe\n\n")),
    ];
    Body::from_stream(stream::iter(chunks))
}

async fn teapot() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}

async fn hello() -> &'static str {
    "hello"
}

/// One data frame followed by trailers.
async fn with_trailers() -> Body {
    let mut trailers = HeaderMap::new();
    trailers.insert("x-checksum", HeaderValue::from_static("abc123"));
    let frames: Vec<Result<Frame<Bytes>, Infallible>> = vec![
        Ok(Frame::data(Bytes::from_static(b"payload"))),
        Ok(Frame::trailers(trailers)),
    ];
    Body::new(StreamBody::new(stream::iter(frames)))
}

fn app() -> Router {
    Router::new()
        .route("/echo", post(echo))
        .route("/stream", get(chunked))
        .route("/teapot", get(teapot))
        .route("/hello", get(hello))
        .route("/trailers", get(with_trailers))
        .layer(middleware::from_fn(log_exchange))
}

/// Log sink shared between the subscriber and the test.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Install a thread-local subscriber writing plain text into a buffer.
///
/// Only valid with the current-thread runtime, which `#[tokio::test]` uses
/// by default.
fn capture_logs() -> (CapturedLogs, tracing::subscriber::DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();
    (logs, tracing::subscriber::set_default(subscriber))
}

/// Assert each marker appears in `logs`, each one after the previous.
fn assert_in_order(logs: &str, markers: &[&str]) {
    let mut from = 0;
    for marker in markers {
        let at = logs[from..]
            .find(marker)
            .unwrap_or_else(|| panic!("{marker:?} not found after byte {from} in:\n{logs}"));
        from += at + marker.len();
    }
}

async fn body_bytes(response: axum::response::Response) -> Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

#[tokio::test]
async fn request_body_reaches_handler_unchanged() {
    let payload = br#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#.to_vec();

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo?trace=1")
                .body(Body::from(payload.clone()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-echo"), Some(&HeaderValue::from_static("1")));
    assert_eq!(body_bytes(response).await.as_ref(), payload.as_slice());
}

#[tokio::test]
async fn chunked_request_body_with_invalid_utf8_is_preserved() {
    let chunks: Vec<Result<Bytes, std::io::Error>> = vec![
        Ok(Bytes::from_static(b"part-1|")),
        Ok(Bytes::from_static(b"\xe4\xb8")),
        Ok(Bytes::from_static(b"\xad|\xff")),
        Ok(Bytes::from_static(b"|end")),
    ];

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo")
                .body(Body::from_stream(stream::iter(chunks)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        body_bytes(response).await.as_ref(),
        b"part-1|\xe4\xb8\xad|\xff|end"
    );
}

#[tokio::test]
async fn streamed_response_reaches_client_unchanged() {
    let response = app()
        .oneshot(Request::builder().uri("/stream").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_bytes(response).await.as_ref(),
        b"data: one\n\ndata: \xe4\xb8\xad\n\ndata: \xff\xfe\n\n"
    );
}

#[tokio::test]
async fn status_and_empty_body_pass_through() {
    let response = app()
        .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn unmatched_route_still_logged_and_returns_404() {
    let response = app()
        .oneshot(Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn exchange_is_logged_from_start_to_end() {
    let (logs, _guard) = capture_logs();

    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/echo?trace=1&user=alice")
                .header("x-client", "integration")
                .body(Body::from("ping-body"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(body_bytes(response).await.as_ref(), b"ping-body");

    let logs = logs.contents();
    assert_in_order(
        &logs,
        &[
            "=== Request Start ===",
            "URL: /echo?trace=1&user=alice",
            "Method: POST",
            "Headers: ",
            "\"x-client\": \"integration\"",
            r#"Query Params: [("trace", "1"), ("user", "alice")]"#,
            "Body chunk: ping-body",
            "Response Body chunk: ping-body",
            "=== Request End ===",
            "status=200 OK",
        ],
    );
}

#[tokio::test]
async fn end_is_logged_once_after_last_response_chunk() {
    let (logs, _guard) = capture_logs();

    let response = app()
        .oneshot(Request::builder().uri("/stream").body(Body::empty()).unwrap())
        .await
        .unwrap();
    body_bytes(response).await;

    let logs = logs.contents();
    assert_in_order(
        &logs,
        &[
            "Response Body chunk: data: one",
            "Response Body chunk: data: \u{4e2d}",
            "=== Request End ===",
        ],
    );
    let last_chunk = logs.rfind("Response Body chunk").unwrap();
    let end = logs.find("=== Request End ===").unwrap();
    assert!(end > last_chunk, "end logged before the last chunk:\n{logs}");
    assert_eq!(logs.matches("=== Request End ===").count(), 1);
}

#[tokio::test]
async fn end_is_logged_for_empty_response() {
    let (logs, _guard) = capture_logs();

    let response = app()
        .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
        .await
        .unwrap();
    drop(response);

    let logs = logs.contents();
    assert_eq!(logs.matches("=== Request End ===").count(), 1);
    assert!(logs.contains("status=418 I'm a teapot"));
}

#[tokio::test]
async fn known_body_length_survives_filter() {
    let response = app()
        .oneshot(Request::builder().uri("/hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.body().size_hint().exact(), Some(5));
    assert_eq!(body_bytes(response).await.as_ref(), b"hello");
}

#[tokio::test]
async fn response_trailers_pass_through() {
    let response = app()
        .oneshot(Request::builder().uri("/trailers").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let collected = response.into_body().collect().await.unwrap();
    assert_eq!(
        collected.trailers().and_then(|t| t.get("x-checksum")),
        Some(&HeaderValue::from_static("abc123"))
    );
    assert_eq!(collected.to_bytes().as_ref(), b"payload");
}

#[test]
fn query_params_keeps_order_and_repeats() {
    let uri: Uri = "/mcp?b=2&a=1&b=3&name=x%20y".parse().unwrap();

    assert_eq!(
        query_params(&uri),
        vec![
            ("b".to_string(), "2".to_string()),
            ("a".to_string(), "1".to_string()),
            ("b".to_string(), "3".to_string()),
            ("name".to_string(), "x y".to_string()),
        ]
    );
}

#[test]
fn query_params_empty_without_query() {
    let uri: Uri = "/mcp".parse().unwrap();
    assert!(query_params(&uri).is_empty());
}
