use axum::{Json, extract::State, response::IntoResponse};
use axum_macros::debug_handler;
use serde::Serialize;

use crate::{
    AppState, Environment,
    error::HandlerError,
    runtime::{self, MemoryUsage},
};

pub const PATH: &str = "/";

pub const MESSAGE: &str = "Hello from Nomad! 🚀";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub message: &'static str,
    pub timestamp: String,
    pub hostname: String,
    pub environment: Environment,
    pub version: String,
    pub uptime: f64,
    pub memory: MemoryUsage,
    pub platform: &'static str,
    pub arch: &'static str,
    /// Compiler the binary was built with.
    #[serde(rename = "nodeVersion")]
    pub runtime_version: &'static str,
}

impl ResponseBody {
    pub fn snapshot(state: &AppState) -> anyhow::Result<Self> {
        Ok(Self {
            message: MESSAGE,
            timestamp: runtime::timestamp()?,
            hostname: state.hostname.clone(),
            environment: state.environment.clone(),
            version: state.version.clone(),
            uptime: runtime::uptime(state.started_at),
            memory: MemoryUsage::current()?,
            platform: runtime::PLATFORM,
            arch: runtime::ARCH,
            runtime_version: runtime::RUNTIME_VERSION,
        })
    }
}

#[debug_handler]
#[tracing::instrument(skip_all, ret)]
pub async fn handler(State(state): State<AppState>) -> Result<ResponseBody, HandlerError> {
    Ok(ResponseBody::snapshot(&state)?)
}

impl IntoResponse for ResponseBody {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}
