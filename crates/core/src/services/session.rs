//! Session service.
//!
//! Holds the single active identity of this process and mirrors it into the
//! store so that it survives a restart.

use std::sync::Arc;

use crimereport_common::{AppError, AppResult, FieldErrors, SharedStore};
use crimereport_db::{entities::Identity, repositories::SessionRepository};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use validator::{Validate, ValidationError};

use crate::navigation::{Navigation, Route};
use crate::services::identity_provider::{IdentityProvider, MIN_PASSWORD_CHARS};

#[allow(clippy::expect_used)]
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("static email pattern"));

/// Credentials submitted by the login view. Passed to the provider as-is.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoginForm {
    /// Sign-in email.
    pub email: String,
    /// Password, checked by the provider.
    pub password: String,
}

/// Registration form.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterForm {
    /// Display name.
    #[validate(custom(function = "validate_name"))]
    pub name: String,

    /// Sign-in email.
    #[validate(custom(function = "validate_email"))]
    pub email: String,

    /// At least six characters.
    #[validate(custom(function = "validate_password"))]
    pub password: String,

    /// Must equal `password`.
    pub confirm_password: String,
}

fn required(message: &'static str) -> ValidationError {
    ValidationError::new("required").with_message(message.into())
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(required("Name is required"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(required("Email is required"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::new("email").with_message("Email is invalid".into()));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(required("Password is required"));
    }
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(ValidationError::new("length")
            .with_message("Password must be at least 6 characters".into()));
    }
    Ok(())
}

impl RegisterForm {
    /// Field-keyed problems with the form; empty when it can be submitted.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => e.into(),
        };

        if self.confirm_password.is_empty() {
            errors.insert("confirmPassword", "Please confirm your password");
        } else if self.password != self.confirm_password {
            errors.insert("confirmPassword", "Passwords do not match");
        }

        errors
    }
}

/// Result of a successful sign-in.
#[derive(Debug, Clone, Serialize)]
pub struct SignedIn {
    /// The identity now signed in.
    pub user: Identity,
    /// Where the client goes next.
    pub next: Navigation,
}

impl SignedIn {
    fn new(user: Identity) -> Self {
        Self {
            user,
            next: Navigation::to(Route::Dashboard),
        }
    }
}

/// Session service.
///
/// Cheap to clone; every clone shares the same session.
#[derive(Clone)]
pub struct SessionManager {
    repo: SessionRepository,
    provider: Arc<dyn IdentityProvider>,
    current: Arc<RwLock<Option<Identity>>>,
}

impl SessionManager {
    /// Restore the persisted identity, if any.
    ///
    /// A stored identity that cannot be read is ignored and the session
    /// starts signed out.
    pub async fn initialize(
        store: SharedStore,
        provider: Arc<dyn IdentityProvider>,
    ) -> AppResult<Self> {
        let repo = SessionRepository::new(store);

        let restored = match repo.load().await {
            Ok(identity) => identity,
            Err(AppError::Serialization(e)) => {
                tracing::warn!(error = %e, "Ignoring unreadable stored session");
                None
            }
            Err(e) => return Err(e),
        };

        if let Some(identity) = &restored {
            tracing::info!(user_id = %identity.id, "Restored session");
        }

        Ok(Self {
            repo,
            provider,
            current: Arc::new(RwLock::new(restored)),
        })
    }

    /// The signed-in identity, if any.
    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    /// Whether an identity is signed in.
    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Sign in, replacing any identity already signed in.
    pub async fn login(&self, form: &LoginForm) -> AppResult<SignedIn> {
        let identity = self.provider.login(&form.email, &form.password).await?;
        self.activate(identity).await
    }

    /// Validate the registration form, create an identity and sign it in.
    pub async fn register(&self, form: &RegisterForm) -> AppResult<SignedIn> {
        form.field_errors().into_result()?;

        let identity = self
            .provider
            .register(form.name.trim(), form.email.trim(), &form.password)
            .await?;
        self.activate(identity).await
    }

    /// Sign out. Signing out while signed out is a no-op.
    pub async fn logout(&self) -> AppResult<()> {
        let mut current = self.current.write().await;
        self.repo.clear().await?;
        if let Some(identity) = current.take() {
            tracing::info!(user_id = %identity.id, "Signed out");
        }
        Ok(())
    }

    async fn activate(&self, identity: Identity) -> AppResult<SignedIn> {
        let mut current = self.current.write().await;
        self.repo.save(&identity).await?;
        tracing::info!(user_id = %identity.id, "Signed in");
        *current = Some(identity.clone());
        Ok(SignedIn::new(identity))
    }
}
