//! Core business logic for crimereport.

pub mod content;
pub mod navigation;
pub mod services;

pub use navigation::{Navigation, Route};
pub use services::*;
