use axum::{extract::OriginalUri, http::Method};
use axum_macros::debug_handler;

use crate::error::HandlerError;

/// Reports the path as the client sent it, before normalization. The query
/// string is not part of the reported path.
#[debug_handler]
pub async fn handler(method: Method, OriginalUri(uri): OriginalUri) -> HandlerError {
    HandlerError::NotFound {
        method,
        path: uri.path().to_string(),
    }
}
