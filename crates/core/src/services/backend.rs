//! Report backend.
//!
//! Provides an abstraction over where reports are filed and looked up.
//! The local implementation keeps them in the key-value store and imitates the
//! response times of a remote service.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crimereport_common::{AppError, AppResult, IdGenerator, config::LatencyConfig};
use crimereport_db::{entities::Report, repositories::ReportRepository};

use crate::services::report_form::NewReport;

/// How many consecutive millisecond values are tried before giving up on
/// finding a free report identifier.
const MAX_ID_ATTEMPTS: i64 = 1_000;

/// Trait for filing and retrieving reports.
#[async_trait]
pub trait ReportBackend: Send + Sync {
    /// File a validated report and return it as stored.
    async fn submit(&self, report: NewReport) -> AppResult<Report>;

    /// Look a report up by exact identifier.
    async fn find(&self, id: &str) -> AppResult<Option<Report>>;

    /// Every filed report, in submission order.
    async fn list(&self) -> AppResult<Vec<Report>>;
}

/// Backend over the local report collection.
#[derive(Clone)]
pub struct LocalReportBackend {
    repo: ReportRepository,
    id_gen: IdGenerator,
    latency: LatencyConfig,
}

impl LocalReportBackend {
    /// Create a backend over `repo` with the given simulated delays.
    #[must_use]
    pub const fn new(repo: ReportRepository, latency: LatencyConfig) -> Self {
        Self {
            repo,
            id_gen: IdGenerator::new(),
            latency,
        }
    }

    /// Identifier derived from `now`, moved forward one millisecond at a time
    /// until it is not one of `taken`.
    fn free_id(&self, taken: &[&str], now: DateTime<Utc>) -> AppResult<String> {
        let start = now.timestamp_millis();
        for offset in 0..MAX_ID_ATTEMPTS {
            let candidate = self.id_gen.report_id_at(start + offset);
            if !taken.contains(&candidate.as_str()) {
                if offset > 0 {
                    tracing::debug!(report_id = %candidate, offset, "Skipped taken report IDs");
                }
                return Ok(candidate);
            }
        }
        Err(AppError::Internal(
            "No free report identifier available".to_string(),
        ))
    }
}

async fn simulate(latency: Duration) {
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }
}

#[async_trait]
impl ReportBackend for LocalReportBackend {
    async fn submit(&self, report: NewReport) -> AppResult<Report> {
        simulate(self.latency.submit()).await;

        let stored = self
            .repo
            .append_with(|taken| {
                let now = Utc::now();
                let id = self.free_id(taken, now)?;
                Ok(report.into_report(id, now))
            })
            .await?;

        tracing::info!(
            report_id = %stored.id,
            crime_type = %stored.crime_type,
            anonymous = stored.anonymous,
            "Report filed"
        );
        Ok(stored)
    }

    async fn find(&self, id: &str) -> AppResult<Option<Report>> {
        simulate(self.latency.lookup()).await;
        self.repo.find_by_id(id).await
    }

    async fn list(&self) -> AppResult<Vec<Report>> {
        self.repo.all().await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crimereport_db::test_utils::{ReportFixture, memory_store, store_with_reports};

    fn backend(repo: ReportRepository) -> LocalReportBackend {
        LocalReportBackend::new(repo, LatencyConfig::none())
    }

    #[test]
    fn test_free_id_skips_taken_values() {
        let now = DateTime::from_timestamp_millis(1_736_951_400_123).unwrap();
        let taken = ["CR400123", "CR400124"];

        let backend = backend(ReportRepository::new(memory_store()));
        assert_eq!(backend.free_id(&taken, now).unwrap(), "CR400125");
        assert_eq!(backend.free_id(&[], now).unwrap(), "CR400123");
    }

    #[tokio::test]
    async fn test_submitted_ids_are_unique() {
        let backend = backend(ReportRepository::new(memory_store()));
        let new_report = crate::services::report_form::ReportForm {
            crime_type: "Fraud".to_string(),
            incident_date: "2025-01-01".to_string(),
            location: "Online".to_string(),
            description: "Fake invoice".to_string(),
            anonymous: true,
            ..Default::default()
        }
        .into_new_report(None)
        .unwrap();

        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(backend.submit(new_report.clone()).await.unwrap().id);
        }
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_find_and_list_read_the_collection() {
        let repo = ReportRepository::new(store_with_reports(&[
            ReportFixture::new("CR000001").build(),
            ReportFixture::new("CR000002").build(),
        ]));
        let backend = backend(repo);

        assert!(backend.find("CR000002").await.unwrap().is_some());
        assert!(backend.find("CR999999").await.unwrap().is_none());
        assert_eq!(backend.list().await.unwrap().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_lookup_latency_is_applied() {
        let latency = LatencyConfig {
            lookup_ms: 1_000,
            ..LatencyConfig::none()
        };
        let backend = LocalReportBackend::new(ReportRepository::new(memory_store()), latency);
        let started = tokio::time::Instant::now();

        backend.find("CR000001").await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(1));
    }
}
