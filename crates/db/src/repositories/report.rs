//! Report repository.

use std::sync::Arc;

use crimereport_common::{AppError, AppResult, REPORTS_KEY, SharedStore};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::entities::Report;

/// Report collection stored as a single JSON array.
///
/// The collection is append-only. Every append rewrites the whole document.
#[derive(Clone)]
pub struct ReportRepository {
    store: SharedStore,
    append_lock: Arc<Mutex<()>>,
}

impl ReportRepository {
    /// Create a new report repository.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stored entries exactly as written, in submission order.
    async fn entries(&self) -> AppResult<Vec<Value>> {
        match self.store.read(REPORTS_KEY).await? {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(entries)) => Ok(entries),
            Some(_) => Err(AppError::Serialization(
                "report collection is not an array".to_string(),
            )),
        }
    }

    /// All readable reports, in submission order.
    ///
    /// Entries that do not decode as a report are skipped.
    pub async fn all(&self) -> AppResult<Vec<Report>> {
        Ok(self.entries().await?.into_iter().filter_map(decode).collect())
    }

    /// Find a report by exact identifier. The first readable match wins.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<Report>> {
        Ok(self
            .entries()
            .await?
            .into_iter()
            .filter(|entry| entry_id(entry) == Some(id))
            .find_map(decode))
    }

    /// Whether any stored entry carries this identifier, readable or not.
    pub async fn contains(&self, id: &str) -> AppResult<bool> {
        Ok(self
            .entries()
            .await?
            .iter()
            .any(|entry| entry_id(entry) == Some(id)))
    }

    /// Reports filed by the given identity, in submission order.
    pub async fn find_by_owner(&self, owner_id: &str) -> AppResult<Vec<Report>> {
        Ok(self
            .all()
            .await?
            .into_iter()
            .filter(|r| r.is_owned_by(owner_id))
            .collect())
    }

    /// Number of stored entries.
    pub async fn count(&self) -> AppResult<usize> {
        Ok(self.entries().await?.len())
    }

    /// Append a report to the collection.
    pub async fn append(&self, report: Report) -> AppResult<Report> {
        self.append_with(move |_| Ok(report)).await
    }

    /// Build a report from the identifiers already taken and append it.
    ///
    /// `build` sees the collection as it is at write time; no other append
    /// from this process can interleave between the read and the write.
    /// Entries that do not decode as a report are written back untouched.
    pub async fn append_with<F>(&self, build: F) -> AppResult<Report>
    where
        F: FnOnce(&[&str]) -> AppResult<Report> + Send,
    {
        let _guard = self.append_lock.lock().await;

        let mut entries = self.entries().await?;
        let report = {
            let taken: Vec<&str> = entries.iter().filter_map(entry_id).collect();
            build(&taken)?
        };
        entries.push(serde_json::to_value(&report)?);
        let total = entries.len();

        self.store.write(REPORTS_KEY, Value::Array(entries)).await?;

        tracing::debug!(report_id = %report.id, total, "Appended report");
        Ok(report)
    }
}

fn entry_id(entry: &Value) -> Option<&str> {
    entry.get("id").and_then(Value::as_str)
}

fn decode(entry: Value) -> Option<Report> {
    let id = entry_id(&entry).map(str::to_owned);
    match serde_json::from_value(entry) {
        Ok(report) => Some(report),
        Err(e) => {
            tracing::warn!(report_id = ?id, error = %e, "Skipping unreadable stored report");
            None
        }
    }
}
