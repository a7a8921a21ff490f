//! Report endpoints.

#![allow(missing_docs)]

use axum::{
    Router,
    extract::{Path, Query, State},
    routing::{get, post},
};
use crimereport_common::{AppResult, FieldErrors};
use crimereport_core::{ReportForm, SubmissionReceipt, TrackedReport};
use serde::{Deserialize, Serialize};

use crate::{
    extractors::{ApiJson, MaybeAuthUser},
    middleware::AppState,
    response::ApiResponse,
};

/// File a report.
///
/// Named reports filed while signed in are linked to the signed-in identity.
async fn submit(
    State(state): State<AppState>,
    MaybeAuthUser(user): MaybeAuthUser,
    ApiJson(form): ApiJson<ReportForm>,
) -> AppResult<ApiResponse<SubmissionReceipt>> {
    let receipt = state.report_service.submit(form, user.as_ref()).await?;
    Ok(ApiResponse::created(receipt))
}

/// Validation result for a form that was not filed.
#[derive(Serialize)]
pub struct ValidateResponse {
    pub valid: bool,
    pub errors: FieldErrors,
}

/// Check a report form without filing it.
async fn validate(
    State(state): State<AppState>,
    ApiJson(form): ApiJson<ReportForm>,
) -> ApiResponse<ValidateResponse> {
    let errors = state.report_service.validate(&form);
    ApiResponse::ok(ValidateResponse {
        valid: errors.is_empty(),
        errors,
    })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShowParams {
    pub just_submitted: bool,
}

/// Look a report up by the identifier in the path.
async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<ShowParams>,
) -> AppResult<ApiResponse<TrackedReport>> {
    let tracked = state
        .report_service
        .track(&id, params.just_submitted)
        .await?;
    Ok(ApiResponse::ok(tracked))
}

/// Lookup request.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackRequest {
    pub report_id: String,
    pub just_submitted: bool,
}

/// Look a report up by the identifier typed into the search box.
async fn track(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TrackRequest>,
) -> AppResult<ApiResponse<TrackedReport>> {
    let tracked = state
        .report_service
        .track(&req.report_id, req.just_submitted)
        .await?;
    Ok(ApiResponse::ok(tracked))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/reports", post(submit))
        .route("/reports/validate", post(validate))
        .route("/reports/{id}", get(show))
        .route("/track", post(track))
}
