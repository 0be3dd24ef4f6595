use axum::{Json, extract::State, response::IntoResponse};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::{AppState, Environment, error::HandlerError, runtime};

pub const PATH: &str = "/health";

pub const HEALTHY: &str = "healthy";

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub status: &'static str,
    pub timestamp: String,
    pub uptime: f64,
    pub environment: Environment,
    pub version: String,
}

#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(State(state): State<AppState>) -> Result<ResponseBody, HandlerError> {
    Ok(ResponseBody {
        status: HEALTHY,
        timestamp: runtime::timestamp()?,
        uptime: runtime::uptime(state.started_at),
        environment: state.environment,
        version: state.version,
    })
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
