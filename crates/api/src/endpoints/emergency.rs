//! Emergency information endpoint.

use axum::{Router, routing::get};
use crimereport_core::content::{self, EmergencyInfo};

use crate::{middleware::AppState, response::ApiResponse};

async fn emergency() -> ApiResponse<&'static EmergencyInfo> {
    ApiResponse::ok(content::emergency())
}

/// Emergency page routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(emergency))
}
