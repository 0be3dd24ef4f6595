#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use hello_server::{AppState, Environment};
use serde_json::Value;
use tower::ServiceExt;

pub mod macros;

pub struct TestClient {
    router: Router,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_routes(hello_server::routes(), Environment::Development)
    }

    pub fn in_environment(environment: Environment) -> Self {
        Self::with_routes(hello_server::routes(), environment)
    }

    /// Serves `routes` behind the production middleware chain.
    pub fn with_routes(routes: Router<AppState>, environment: Environment) -> Self {
        tracing_init();
        let state = AppState::new(environment, "1.0.0", "test-host");
        Self {
            router: hello_server::server(routes, state),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> Asserter {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .unwrap(/* Infallible */);
        Asserter::from(response)
    }

    pub async fn get(&self, uri: &str) -> Asserter {
        self.send(crate::request!(GET uri)).await
    }
}

pub struct Asserter {
    response: Response<Body>,
}

impl Asserter {
    pub fn into_response(self) -> Response<Body> {
        self.response
    }

    pub fn status(self, expected: u16) -> Self {
        assert_eq!(
            self.response.status().as_u16(),
            expected,
            "expected status {}, got {}",
            expected,
            self.response.status()
        );
        self
    }

    pub fn is_success(self) -> Self {
        assert!(
            self.response.status().is_success(),
            "expected 2xx status, got {}",
            self.response.status()
        );
        self
    }

    pub fn header(self, name: &str, expected: &str) -> Self {
        let actual = self
            .response
            .headers()
            .get(name)
            .unwrap_or_else(|| panic!("expected header `{name}` to be present"));
        assert_eq!(actual, expected, "header `{name}`");
        self
    }

    pub fn has_header(self, name: &str) -> Self {
        assert!(
            self.response.headers().contains_key(name),
            "expected header `{name}` to be present"
        );
        self
    }

    pub async fn json_body(self, f: impl FnOnce(Value)) {
        f(self.into_json().await)
    }

    pub async fn into_json(self) -> Value {
        let body_bytes = to_bytes(self.response.into_body(), usize::MAX)
            .await
            .expect("unable to read response body");

        serde_json::from_slice::<Value>(&body_bytes).expect("unable to deserialize response body")
    }
}

impl From<Response<Body>> for Asserter {
    fn from(response: Response<Body>) -> Self {
        Self { response }
    }
}

/// Sorted top-level keys of a JSON object.
pub fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value
        .as_object()
        .expect("expected a JSON object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    keys
}

static TRACING_INIT: std::sync::Once = std::sync::Once::new();

pub fn tracing_init() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(tracing_subscriber::fmt::layer().with_test_writer())
            .init();
    });
}
