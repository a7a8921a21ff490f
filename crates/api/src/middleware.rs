//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use crimereport_core::{DashboardService, ReportService, SessionManager};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// Process-wide session.
    pub session: SessionManager,
    /// Report submission and lookup.
    pub report_service: ReportService,
    /// Per-user dashboard.
    pub dashboard_service: DashboardService,
}

/// Authentication middleware.
///
/// The process holds one session; while it is signed in every request runs
/// as that identity.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(identity) = state.session.current().await {
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}
