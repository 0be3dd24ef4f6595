use axum::{
    Json,
    body::{Body, to_bytes},
    extract::State,
    http::{Request, Response},
    middleware::Next,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::{ErrorBody, FailureDetail, INTERNAL_SERVER_ERROR, SOMETHING_WENT_WRONG},
};

/// Every 5xx leaves the service in one shape. The failure detail is shown
/// only in development; anywhere else the client gets a generic message.
///
/// Handlers and the panic catcher attach a [`FailureDetail`]. A 5xx without
/// one leaked from somewhere unexpected, so its body is logged and treated
/// as the detail.
pub async fn mw_render_5xx(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let response = next.run(request).await;
    let status = response.status();

    if !status.is_server_error() {
        return response;
    }

    let detail = match response.extensions().get::<FailureDetail>().cloned() {
        Some(FailureDetail(detail)) => detail,
        None => leaked_detail(response).await,
    };

    let message = if state.environment.is_development() {
        detail
    } else {
        INTERNAL_SERVER_ERROR.to_string()
    };

    (
        status,
        Json(ErrorBody {
            error: SOMETHING_WENT_WRONG,
            message,
        }),
    )
        .into_response()
}

async fn leaked_detail(response: Response<Body>) -> String {
    let status = response.status();
    let reason = || status.canonical_reason().unwrap_or_default().to_string();

    match to_bytes(response.into_body(), usize::MAX).await {
        Ok(content) if !content.is_empty() => {
            tracing::error!("{:?}", content);
            String::from_utf8_lossy(&content).into_owned()
        }
        Ok(_) => reason(),
        Err(e) => {
            tracing::error!("unable to convert {status} response body to bytes :: {e:?}");
            reason()
        }
    }
}
