use axum::{Json, extract::State};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::{AppState, SERVICE_NAME};

pub const PATH: &str = "/api/info";

pub const DESCRIPTION: &str = "A simple Hello World application for Nomad deployment";

/// Every route this service answers, in registration order.
pub const ENDPOINTS: [&str; 4] = ["GET /", "GET /health", "GET /api/status", "GET /api/info"];

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub service: &'static str,
    pub version: String,
    pub description: &'static str,
    pub endpoints: [&'static str; 4],
}

#[debug_handler]
#[tracing::instrument(skip_all)]
pub async fn handler(State(state): State<AppState>) -> Json<ResponseBody> {
    Json(ResponseBody {
        service: SERVICE_NAME,
        version: state.version,
        description: DESCRIPTION,
        endpoints: ENDPOINTS,
    })
}
