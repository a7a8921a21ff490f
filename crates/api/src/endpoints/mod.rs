//! API endpoints.

mod auth;
mod dashboard;
mod emergency;
mod meta;
mod reports;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(meta::router())
        .merge(reports::router())
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/emergency", emergency::router())
}
