//! Common utilities and shared types for crimereport.
//!
//! This crate provides foundational components used across all crimereport crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: Report and identity identifiers via [`IdGenerator`]
//! - **Storage**: The local key-value store via [`KeyValueStore`]
//!
//! # Example
//!
//! ```no_run
//! use crimereport_common::{AppResult, Config, IdGenerator};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     println!("Next report ID: {}", id_gen.report_id());
//!     println!("Listening on {}", config.bind_address());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult, FieldErrors};
pub use id::{IdGenerator, REPORT_ID_PREFIX, is_report_id};
pub use storage::{
    JsonFileStore, KeyValueStore, MemoryStore, REPORTS_KEY, SESSION_KEY, SharedStore, open_store,
};
