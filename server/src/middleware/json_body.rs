use anyhow::Context;
use axum::{
    body::{Body, Bytes, to_bytes},
    extract::Request,
    http::header::CONTENT_TYPE,
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::{BODY_LIMIT, error::HandlerError};

/// Body parser for `application/json` requests. A body over [`BODY_LIMIT`]
/// or one that is not valid JSON fails the request as a handler failure
/// before any route is matched. Other content types pass through untouched.
pub async fn mw_json_body(request: Request, next: Next) -> Response {
    if !is_json(&request) {
        return next.run(request).await;
    }

    let (parts, body) = request.into_parts();
    let bytes = match read_json(body).await {
        Ok(bytes) => bytes,
        Err(e) => return HandlerError::from(e).into_response(),
    };

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn is_json<B>(request: &axum::http::Request<B>) -> bool {
    request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

async fn read_json(body: Body) -> anyhow::Result<Bytes> {
    let bytes = to_bytes(body, BODY_LIMIT)
        .await
        .context("read JSON body")?;

    // an empty body is treated as no body at all
    if !bytes.is_empty() {
        serde_json::from_slice::<Value>(&bytes).context("parse JSON body")?;
    }

    Ok(bytes)
}
