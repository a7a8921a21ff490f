//! Persisted entities.

pub mod identity;
pub mod report;

pub use identity::{Identity, Role};
pub use report::{CrimeType, Report, ReportStatus, StatusUpdate, UnknownCrimeType};
