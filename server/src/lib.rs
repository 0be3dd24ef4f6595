mod api;
mod environment;
mod error;
mod middleware;
mod runtime;
mod signal;
mod span;

use std::{future::IntoFuture, net::SocketAddr, time::Instant};

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state, map_request},
    routing::get,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    normalize_path::NormalizePathLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use environment::Environment;
pub use error::{FailureDetail, HandlerError, InternalError};
pub use signal::Shutdown;

pub const SERVICE_NAME: &str = "nomad-hello-world";

/// JSON request bodies larger than this fail the request before routing.
pub const BODY_LIMIT: usize = 100 * 1024;

#[derive(Debug, Clone)]
pub struct ServerOpts {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub version: String,
    pub hostname: String,
}

/// Read-only state shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub environment: Environment,
    pub version: String,
    pub hostname: String,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        environment: Environment,
        version: impl Into<String>,
        hostname: impl Into<String>,
    ) -> Self {
        Self {
            environment,
            version: version.into(),
            hostname: hostname.into(),
            started_at: Instant::now(),
        }
    }
}

impl From<&ServerOpts> for AppState {
    fn from(opts: &ServerOpts) -> Self {
        Self::new(
            opts.environment.clone(),
            opts.version.clone(),
            opts.hostname.clone(),
        )
    }
}

/// The fixed routing table. Anything it does not match, including a known
/// path with the wrong method, lands in the not-found handler. Paths are
/// matched after [`server`] trims trailing slashes and lowercases them.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(api::root::PATH, get(api::root::handler))
        .route(api::health::PATH, get(api::health::handler))
        .route(api::status::PATH, get(api::status::handler))
        .route(api::info::PATH, get(api::info::handler))
        .fallback(api::not_found::handler)
        .method_not_allowed_fallback(api::not_found::handler)
}

/// Wraps `router` in the middleware chain. Layers are listed outermost first.
///
/// Path normalization has to run before route matching, so the routing table
/// sits behind it as the fallback service of an outer router. The outer
/// router records the untouched uri as `OriginalUri`.
pub fn server(router: Router<AppState>, state: AppState) -> Router {
    let layers = ServiceBuilder::new()
        .layer(from_fn(middleware::mw_security_headers))
        .layer(middleware::cors())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(from_fn(middleware::mw_client_ip))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(span::span)
                .on_response(span::on_response),
        )
        .layer(from_fn_with_state(state.clone(), middleware::mw_render_5xx))
        .layer(from_fn(middleware::mw_json_body))
        .layer(CatchPanicLayer::custom(middleware::handle_panic));

    let routing = ServiceBuilder::new()
        .layer(NormalizePathLayer::trim_trailing_slash())
        .layer(map_request(middleware::lowercase_path))
        .service(router.with_state(state));

    Router::new().fallback_service(routing).layer(layers)
}

pub async fn serve(opts: ServerOpts) -> Result<(), ServerError> {
    tracing::debug!("{:?}", opts);

    let app = server(routes(), AppState::from(&opts))
        .into_make_service_with_connect_info::<SocketAddr>();

    let addr = bind_addr(&opts);
    let listener = TcpListener::bind((opts.host.as_str(), opts.port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    let local_addr = listener.local_addr().map_err(ServerError::LocalAddr)?;
    let shutdown = signal::shutdown_signal().map_err(ServerError::Signal)?;

    for line in startup_lines(&opts) {
        tracing::info!(%local_addr, "{line}");
    }

    // In-flight requests are dropped with the runtime rather than drained.
    tokio::select! {
        result = axum::serve(listener, app).into_future() => result.map_err(ServerError::Serve),
        signal = shutdown => {
            tracing::info!("{signal} received, shutting down gracefully");
            Ok(())
        }
    }
}

fn bind_addr(opts: &ServerOpts) -> String {
    format!("{}:{}", opts.host, opts.port)
}

fn startup_lines(opts: &ServerOpts) -> [String; 3] {
    let addr = bind_addr(opts);
    [
        format!("🚀 Hello World app listening on {addr}"),
        format!("Environment: {}", opts.environment),
        format!("Health check: http://{addr}{}", api::health::PATH),
    ]
}

#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("bind :: {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("local_addr")]
    LocalAddr(#[source] std::io::Error),

    #[error("install signal handlers")]
    Signal(#[source] std::io::Error),

    #[error("axum::serve")]
    Serve(#[source] std::io::Error),
}
