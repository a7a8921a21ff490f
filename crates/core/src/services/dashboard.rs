//! Dashboard service.

#![allow(missing_docs)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crimereport_common::{AppError, AppResult};
use crimereport_db::entities::{CrimeType, Identity, Report, ReportStatus};
use serde::Serialize;

use crate::navigation::Navigation;
use crate::services::backend::ReportBackend;

/// Report counts per status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: usize,
    pub submitted: usize,
    pub under_review: usize,
    pub investigating: usize,
    pub resolved: usize,
    pub closed: usize,
}

impl DashboardStats {
    #[must_use]
    pub fn from_reports(reports: &[Report]) -> Self {
        reports.iter().fold(Self::default(), |mut stats, report| {
            stats.total += 1;
            match report.status {
                ReportStatus::Submitted => stats.submitted += 1,
                ReportStatus::UnderReview => stats.under_review += 1,
                ReportStatus::Investigating => stats.investigating += 1,
                ReportStatus::Resolved => stats.resolved += 1,
                ReportStatus::Closed => stats.closed += 1,
            }
            stats
        })
    }
}

/// One row of the dashboard report list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardEntry {
    pub id: String,
    pub crime_type: CrimeType,
    pub location: String,
    pub status: ReportStatus,
    pub status_label: &'static str,
    pub submitted_at: DateTime<Utc>,
    pub track: Navigation,
}

impl From<&Report> for DashboardEntry {
    fn from(report: &Report) -> Self {
        Self {
            id: report.id.clone(),
            crime_type: report.crime_type,
            location: report.location.clone(),
            status: report.status,
            status_label: report.status.label(),
            submitted_at: report.submitted_at,
            track: Navigation::track(&report.id, false),
        }
    }
}

/// Dashboard view for the signed-in identity.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub user: Identity,
    pub stats: DashboardStats,
    /// Newest first.
    pub reports: Vec<DashboardEntry>,
}

/// Dashboard service for business logic.
#[derive(Clone)]
pub struct DashboardService {
    backend: Arc<dyn ReportBackend>,
}

impl DashboardService {
    /// Create a new dashboard service.
    #[must_use]
    pub const fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self { backend }
    }

    /// Reports filed by `identity`, with counts per status.
    ///
    /// Without an identity the caller is sent to the login view.
    pub async fn dashboard(&self, identity: Option<&Identity>) -> AppResult<Dashboard> {
        let identity = identity.ok_or(AppError::Unauthorized)?;

        let mut owned: Vec<Report> = self
            .backend
            .list()
            .await?
            .into_iter()
            .filter(|r| r.is_owned_by(&identity.id))
            .collect();

        let stats = DashboardStats::from_reports(&owned);
        // Stable sort keeps submission order for identical timestamps.
        owned.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        Ok(Dashboard {
            user: identity.clone(),
            stats,
            reports: owned.iter().map(DashboardEntry::from).collect(),
        })
    }
}
