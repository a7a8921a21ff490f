//! Test utilities for store-backed repositories.
//!
//! Provides an in-memory store and report fixtures shared by the test suites
//! of the crates built on top of this one.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use crimereport_common::{MemoryStore, REPORTS_KEY, SharedStore};
use serde_json::Value;

use crate::entities::{CrimeType, Report, ReportStatus, StatusUpdate};

/// Fresh, empty in-memory store.
#[must_use]
pub fn memory_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

/// In-memory store whose report collection holds `reports`.
#[must_use]
pub fn store_with_reports(reports: &[Report]) -> SharedStore {
    let value = serde_json::to_value(reports).unwrap_or(Value::Null);
    Arc::new(MemoryStore::with_entries([(REPORTS_KEY, value)]))
}

/// Builder for report fixtures.
#[derive(Debug, Clone)]
pub struct ReportFixture {
    report: Report,
}

impl ReportFixture {
    /// Non-anonymous theft report with the given identifier.
    #[must_use]
    pub fn new(id: &str) -> Self {
        let submitted_at = fixed_time();
        Self {
            report: Report {
                id: id.to_string(),
                crime_type: CrimeType::TheftBurglary,
                incident_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
                incident_time: None,
                location: "Main St".to_string(),
                description: "Bicycle taken from the rack".to_string(),
                witnesses: None,
                suspect: None,
                evidence: None,
                anonymous: false,
                contact_name: Some("Alice".to_string()),
                contact_phone: None,
                contact_email: Some("alice@example.com".to_string()),
                status: ReportStatus::Submitted,
                submitted_at,
                owner_id: None,
                history: vec![StatusUpdate {
                    status: ReportStatus::Submitted,
                    message: Report::SUBMITTED_MESSAGE.to_string(),
                    at: submitted_at,
                }],
            },
        }
    }

    /// Set the status.
    #[must_use]
    pub fn status(mut self, status: ReportStatus) -> Self {
        self.report.status = status;
        self
    }

    /// Record `owner_id` as the filer.
    #[must_use]
    pub fn owner(mut self, owner_id: &str) -> Self {
        self.report.owner_id = Some(owner_id.to_string());
        self
    }

    /// Mark the report anonymous and drop contact details.
    #[must_use]
    pub fn anonymous(mut self) -> Self {
        self.report.anonymous = true;
        self.report.contact_name = None;
        self.report.contact_phone = None;
        self.report.contact_email = None;
        self.report.owner_id = None;
        self
    }

    /// Set the submission time.
    #[must_use]
    pub fn submitted_at(mut self, at: DateTime<Utc>) -> Self {
        self.report.submitted_at = at;
        for update in &mut self.report.history {
            update.at = at;
        }
        self
    }

    /// Finish the report.
    #[must_use]
    pub fn build(self) -> Report {
        self.report
    }
}

/// 2025-01-15T14:30:00Z
#[must_use]
pub fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_736_951_400, 0).unwrap_or_default()
}
