use std::any::Any;

use axum::{
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};

use crate::error::FailureDetail;

/// Turns a handler panic into the same bare 500 a returned error produces,
/// leaving the final body to [`mw_render_5xx`](super::mw_render_5xx).
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        String::from("handler panicked")
    };

    tracing::error!("handler panicked :: {detail}");

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response.extensions_mut().insert(FailureDetail(detail));
    response
}
