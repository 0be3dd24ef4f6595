use axum::http::Method;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};

/// Any origin may call the API. Preflight requests are answered here and
/// never reach the router.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_headers(AllowHeaders::mirror_request())
}
