use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

pub const NOT_FOUND: &str = "Not found";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";
pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";

#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    #[error("Route {method} {path} not found")]
    NotFound { method: Method, path: String },

    #[error("{0}")]
    Internal(#[from] InternalError),
}

/// Wraps whatever went wrong inside a handler. `Display` renders the whole
/// cause chain on one line, `Debug` adds the backtrace when one was captured.
#[derive(thiserror::Error, Debug)]
#[error("{0:#}")]
pub struct InternalError(#[from] pub anyhow::Error);

/// Carried in the extensions of a 500 response until
/// [`mw_render_5xx`](crate::middleware::mw_render_5xx) decides how much of it
/// the client gets to see.
#[derive(Debug, Clone)]
pub struct FailureDetail(pub String);

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        match self {
            HandlerError::NotFound { .. } => {
                let message = self.to_string();
                tracing::debug!("{message}");
                (
                    StatusCode::NOT_FOUND,
                    Json(ErrorBody {
                        error: NOT_FOUND,
                        message,
                    }),
                )
                    .into_response()
            }
            HandlerError::Internal(e) => {
                tracing::error!("{:?}", e.0);
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response.extensions_mut().insert(FailureDetail(e.to_string()));
                response
            }
        }
    }
}

impl From<anyhow::Error> for HandlerError {
    fn from(err: anyhow::Error) -> Self {
        HandlerError::Internal(InternalError(err))
    }
}
