//! Identity provider.
//!
//! Provides an abstraction over whatever issues identities.
//! The only implementation today is a local mock with fixed rules.

use std::time::Duration;

use async_trait::async_trait;
use crimereport_common::{AppError, AppResult, IdGenerator};
use crimereport_db::entities::Identity;

/// Minimum password length accepted by the provider, in characters.
pub const MIN_PASSWORD_CHARS: usize = 6;

/// Trait for issuing identities.
///
/// This allows the session manager to sign users in without depending on
/// how credentials are checked.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an identity.
    async fn login(&self, email: &str, password: &str) -> AppResult<Identity>;

    /// Create a new identity.
    async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Identity>;
}

/// Mock provider.
///
/// Any non-empty email with a password of at least six characters signs in.
/// Nothing is looked up or stored; the same credentials always yield the same
/// identity.
#[derive(Debug, Clone, Default)]
pub struct MockIdentityProvider {
    latency: Duration,
    id_gen: IdGenerator,
}

impl MockIdentityProvider {
    /// Provider that answers immediately.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            latency: Duration::ZERO,
            id_gen: IdGenerator::new(),
        }
    }

    /// Delay every call by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

fn long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_CHARS
}

/// Display name derived from an email: everything before the first `@`.
#[must_use]
pub fn name_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn login(&self, email: &str, password: &str) -> AppResult<Identity> {
        self.simulate_latency().await;

        if email.is_empty() || !long_enough(password) {
            return Err(AppError::InvalidCredentials("Invalid credentials".to_string()));
        }

        Ok(Identity::citizen("1", email, name_from_email(email)))
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> AppResult<Identity> {
        self.simulate_latency().await;

        if name.is_empty() || email.is_empty() || !long_enough(password) {
            return Err(AppError::BadRequest("Invalid data".to_string()));
        }

        Ok(Identity::citizen(self.id_gen.timestamp_id(), email, name))
    }
}
