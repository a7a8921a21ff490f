//! Dashboard endpoint.

use axum::{Router, extract::State, routing::get};
use crimereport_common::AppResult;
use crimereport_core::Dashboard;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Reports filed by the signed-in identity.
async fn dashboard(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> AppResult<ApiResponse<Dashboard>> {
    let dashboard = state.dashboard_service.dashboard(Some(&user)).await?;
    Ok(ApiResponse::ok(dashboard))
}

/// Dashboard routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}
