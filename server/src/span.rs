//! Access logging. The span carries the request half of a combined log line
//! (remote address, request id, method, uri, version, referrer, user agent);
//! [`on_response`] fills in status and latency and emits the line.

use std::time::Duration;

use http::{
    Request, Response,
    header::{REFERER, USER_AGENT},
};
use tracing::{Span, field::Empty};

use crate::middleware::ClientIp;

fn header<'a, B>(request: &'a Request<B>, name: impl http::header::AsHeaderName) -> &'a str {
    request
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-")
}

/// `error_span!` keeps the span alive under `RUST_LOG=warn` and above, so a
/// handler failure logged deeper in the stack still carries this context.
pub fn span<B>(request: &Request<B>) -> Span {
    let client_ip = request
        .extensions()
        .get::<ClientIp>()
        .copied()
        .unwrap_or_default();

    tracing::error_span!(
        "request",
        remote_addr = %client_ip,
        request_id = header(request, "x-request-id"),
        method = %request.method(),
        uri = %request.uri(),
        version = ?request.version(),
        referrer = header(request, REFERER),
        user_agent = header(request, USER_AGENT),
        status = Empty,
        latency_ms = Empty,
    )
}

pub fn on_response<B>(response: &Response<B>, latency: Duration, span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = latency.as_secs_f64() * 1000.0;

    span.record("status", status);
    span.record("latency_ms", latency_ms);

    tracing::info!(status, latency_ms, "response");
}
