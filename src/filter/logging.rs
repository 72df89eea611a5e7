//! Request/response body logging middleware.
//!
//! Bodies are tapped frame by frame as they stream, never buffered. Each data
//! frame is logged and then forwarded unchanged, so the handler and the client
//! see exactly the original bytes. The tap forwards the inner body's size hint
//! and trailers, so a known `Content-Length` survives the filter. Streaming
//! responses (SSE from the MCP transport) are logged as each event is written,
//! and `=== Request End ===` is logged once the response body is finished.

use std::pin::Pin;
use std::task::{Context, Poll};

use axum::{
    Error,
    body::{Body, Bytes, HttpBody},
    extract::{Query, Request},
    http::{StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use http_body::{Frame, SizeHint};
use tracing::{info, warn};

/// Decode the query string into ordered key/value pairs. Repeated keys are kept.
pub fn query_params(uri: &Uri) -> Vec<(String, String)> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(params)) => params,
        Err(e) => {
            warn!(error = %e, "Unparseable query string");
            Vec::new()
        }
    }
}

/// A body that logs every data frame under `label` as it passes.
///
/// When `end` is set, the exchange's closing line is logged exactly once:
/// after the last frame, on a body error, or when the body is dropped early.
struct Tap {
    inner: Body,
    label: &'static str,
    end: Option<StatusCode>,
}

impl Tap {
    fn request(inner: Body) -> Self {
        Self {
            inner,
            label: "Body chunk",
            end: None,
        }
    }

    fn response(inner: Body, status: StatusCode) -> Self {
        Self {
            inner,
            label: "Response Body chunk",
            end: Some(status),
        }
    }

    fn finish(&mut self) {
        if let Some(status) = self.end.take() {
            info!(status = %status, "=== Request End ===");
        }
    }
}

impl HttpBody for Tap {
    type Data = Bytes;
    type Error = Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_frame(cx);
        match polled {
            Poll::Pending => Poll::Pending,
            Poll::Ready(Some(Ok(frame))) => {
                if let Some(chunk) = frame.data_ref() {
                    info!("{}: {}", this.label, String::from_utf8_lossy(chunk));
                }
                if this.inner.is_end_stream() {
                    this.finish();
                }
                Poll::Ready(Some(Ok(frame)))
            }
            Poll::Ready(Some(Err(e))) => {
                warn!(error = %e, "{} stream failed", this.label);
                this.finish();
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finish();
                Poll::Ready(None)
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        self.inner.is_end_stream()
    }

    fn size_hint(&self) -> SizeHint {
        self.inner.size_hint()
    }
}

impl Drop for Tap {
    fn drop(&mut self) {
        self.finish();
    }
}

/// Log the request line, headers, query parameters and both bodies.
///
/// Apply with `axum::middleware::from_fn(log_exchange)`.
pub async fn log_exchange(request: Request, next: Next) -> Response {
    info!("=== Request Start ===");
    info!("URL: {}", request.uri());
    info!("Method: {}", request.method());
    info!("Headers: {:?}", request.headers());
    info!("Query Params: {:?}", query_params(request.uri()));

    let (parts, body) = request.into_parts();
    let request = Request::from_parts(parts, Body::new(Tap::request(body)));

    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let status = parts.status;
    Response::from_parts(parts, Body::new(Tap::response(body, status)))
}
