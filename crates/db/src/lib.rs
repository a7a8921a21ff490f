//! Persistence layer for crimereport.
//!
//! Entities are plain serde types. Repositories map them onto documents in
//! the local key-value store from [`crimereport_common::storage`].

pub mod entities;
pub mod repositories;
pub mod test_utils;
