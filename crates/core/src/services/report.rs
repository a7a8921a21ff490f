//! Report service: submission and lookup.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use crimereport_common::{AppError, AppResult, FieldErrors};
use crimereport_db::entities::{Identity, Report, ReportStatus, StatusUpdate};
use serde::Serialize;

use crate::navigation::Navigation;
use crate::services::backend::ReportBackend;
use crate::services::report_form::ReportForm;

const REPORT_NOT_FOUND: &str = "Report not found. Please check your report ID and try again.";

/// A filed report and where the client goes next.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReceipt {
    /// The report as stored.
    pub report: Report,
    /// Tracking view for the new report.
    pub next: Navigation,
}

/// One step of the lifecycle shown while tracking a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    /// Lifecycle step.
    pub status: ReportStatus,
    /// Display label of the step.
    pub label: &'static str,
    /// The report is at or past this step.
    pub reached: bool,
    /// The report is at exactly this step.
    pub current: bool,
    /// When the report entered this step, if that was recorded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub at: Option<DateTime<Utc>>,
}

/// Lifecycle progress of a report with the given status and recorded history.
///
/// A closed report has passed every step without being at any of them.
#[must_use]
pub fn progress(status: ReportStatus, timeline: &[StatusUpdate]) -> Vec<ProgressStep> {
    ReportStatus::TRACKED_STEPS
        .into_iter()
        .map(|step| ProgressStep {
            status: step,
            label: step.label(),
            reached: step <= status,
            current: step == status,
            at: timeline.iter().find(|u| u.status == step).map(|u| u.at),
        })
        .collect()
}

/// Result of a successful lookup.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedReport {
    /// The report as stored.
    pub report: Report,
    /// Recorded status changes, oldest first.
    pub timeline: Vec<StatusUpdate>,
    /// One entry per lifecycle step.
    pub progress: Vec<ProgressStep>,
    /// Opened straight after submission.
    pub just_submitted: bool,
}

impl TrackedReport {
    fn new(report: Report, just_submitted: bool) -> Self {
        let timeline = report.timeline();
        let progress = progress(report.status, &timeline);
        Self {
            report,
            timeline,
            progress,
            just_submitted,
        }
    }
}

/// Report service for business logic.
#[derive(Clone)]
pub struct ReportService {
    backend: Arc<dyn ReportBackend>,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(backend: Arc<dyn ReportBackend>) -> Self {
        Self { backend }
    }

    /// Check a form without filing it.
    #[must_use]
    pub fn validate(&self, form: &ReportForm) -> FieldErrors {
        form.field_errors()
    }

    /// File a report.
    ///
    /// `submitter` is recorded as the owner of named reports only.
    pub async fn submit(
        &self,
        form: ReportForm,
        submitter: Option<&Identity>,
    ) -> AppResult<SubmissionReceipt> {
        let new_report = form.into_new_report(submitter)?;
        let report = self.backend.submit(new_report).await?;
        let next = Navigation::track(&report.id, true);
        Ok(SubmissionReceipt { report, next })
    }

    /// Look a report up by identifier.
    ///
    /// Surrounding whitespace is ignored; otherwise the match is exact.
    pub async fn track(&self, report_id: &str, just_submitted: bool) -> AppResult<TrackedReport> {
        let report_id = report_id.trim();
        if report_id.is_empty() {
            return Err(AppError::field("reportId", "Please enter a report ID"));
        }

        match self.backend.find(report_id).await? {
            Some(report) => Ok(TrackedReport::new(report, just_submitted)),
            None => {
                tracing::debug!(report_id, "Report lookup missed");
                Err(AppError::ReportNotFound(REPORT_NOT_FOUND.to_string()))
            }
        }
    }
}
