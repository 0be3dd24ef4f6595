use axum::Json;
use axum_macros::debug_handler;
use serde::Serialize;

use crate::{SERVICE_NAME, error::HandlerError, runtime};

pub const PATH: &str = "/api/status";

#[derive(Debug, Serialize)]
pub struct ResponseBody {
    pub status: &'static str,
    pub service: &'static str,
    pub timestamp: String,
}

#[debug_handler]
#[tracing::instrument(ret)]
pub async fn handler() -> Result<Json<ResponseBody>, HandlerError> {
    Ok(Json(ResponseBody {
        status: "running",
        service: SERVICE_NAME,
        timestamp: runtime::timestamp()?,
    }))
}
