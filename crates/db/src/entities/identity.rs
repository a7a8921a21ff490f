//! Signed-in identity entity.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};

/// Role of a signed-in identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Citizen,
}

/// The locally simulated signed-in user.
///
/// No password or credential of any kind is kept on this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

impl Identity {
    /// Create a citizen identity.
    pub fn citizen(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role: Role::Citizen,
        }
    }
}
