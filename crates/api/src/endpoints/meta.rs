//! Meta endpoints.

#![allow(missing_docs)]

use axum::{Router, routing::get};
use crimereport_core::content::{self, HomeContent, NavLink};
use crimereport_db::entities::Identity;
use serde::Serialize;

use crate::{extractors::MaybeAuthUser, middleware::AppState, response::ApiResponse};

/// Server metadata response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub user: Option<Identity>,
    pub nav: Vec<NavLink>,
    pub home: &'static HomeContent,
}

/// Get server metadata and home page content.
async fn meta(MaybeAuthUser(user): MaybeAuthUser) -> ApiResponse<MetaResponse> {
    ApiResponse::ok(MetaResponse {
        name: "CrimeReport",
        version: env!("CARGO_PKG_VERSION"),
        nav: content::nav_links(user.is_some()),
        user,
        home: content::home(),
    })
}

/// Categories offered by the report form.
async fn crime_types() -> ApiResponse<Vec<&'static str>> {
    ApiResponse::ok(content::crime_types())
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meta", get(meta))
        .route("/crime-types", get(crime_types))
}
