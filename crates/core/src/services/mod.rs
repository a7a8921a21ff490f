//! Business logic services.

#![allow(missing_docs)]

pub mod backend;
pub mod dashboard;
pub mod identity_provider;
pub mod report;
pub mod report_form;
pub mod session;

pub use backend::{LocalReportBackend, ReportBackend};
pub use dashboard::{Dashboard, DashboardEntry, DashboardService, DashboardStats};
pub use identity_provider::{IdentityProvider, MockIdentityProvider};
pub use report::{ProgressStep, ReportService, SubmissionReceipt, TrackedReport};
pub use report_form::{NewReport, ReportForm};
pub use session::{LoginForm, RegisterForm, SessionManager, SignedIn};
