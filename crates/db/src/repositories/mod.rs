//! Repositories over the local key-value store.

mod report;
mod session;

pub use report::ReportRepository;
pub use session::SessionRepository;
