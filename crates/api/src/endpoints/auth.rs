//! Authentication endpoints.

use axum::{
    Router,
    extract::State,
    routing::{get, post},
};
use crimereport_common::AppResult;
use crimereport_core::{LoginForm, Navigation, RegisterForm, Route, SignedIn};
use crimereport_db::entities::Identity;
use serde::Serialize;

use crate::{
    extractors::{ApiJson, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// Sign in with email and password.
async fn login(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<LoginForm>,
) -> AppResult<ApiResponse<SignedIn>> {
    let signed_in = state.session.login(&form).await?;
    Ok(ApiResponse::ok(signed_in))
}

/// Create an identity and sign in as it.
async fn register(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<RegisterForm>,
) -> AppResult<ApiResponse<SignedIn>> {
    let signed_in = state.session.register(&form).await?;
    Ok(ApiResponse::created(signed_in))
}

/// Logout response.
#[derive(Serialize)]
pub struct LogoutResponse {
    /// Where the client goes next.
    pub next: Navigation,
}

/// Sign out.
async fn logout(State(state): State<AppState>) -> AppResult<ApiResponse<LogoutResponse>> {
    state.session.logout().await?;
    Ok(ApiResponse::ok(LogoutResponse {
        next: Navigation::to(Route::Home),
    }))
}

/// The signed-in identity, or `null`.
async fn me(MaybeAuthUser(user): MaybeAuthUser) -> ApiResponse<Option<Identity>> {
    ApiResponse::ok(user)
}

/// Session routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/logout", post(logout))
        .route("/me", get(me))
}
