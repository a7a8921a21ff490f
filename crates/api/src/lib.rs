//! HTTP API layer for crimereport.
//!
//! This crate provides the JSON API the client views talk to:
//!
//! - **Endpoints**: report submission and lookup, session, dashboard, static content
//! - **Extractors**: the signed-in identity
//! - **Middleware**: session identity, tracing, CORS, body limits
//!
//! Built on Axum 0.8 with Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

use axum::{Router, middleware::from_fn_with_state};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub use endpoints::router;
pub use middleware::AppState;

/// Largest request body accepted, in bytes. Report forms are plain text.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// The full application: API routes under `/api` with the middleware stack.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", router())
        .layer(from_fn_with_state(state.clone(), middleware::auth_middleware))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
