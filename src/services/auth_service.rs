//! Domain service for authentication of the owner account.
//!
//! Handles credential checks, session resolution, and provisioning of the
//! owner's login.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::User;
use crate::domain::UserId;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown username, wrong password, and an unprovisioned owner all
    /// collapse into this one variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Proof of a successful login, stored in the session by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerSession {
    pub user_id: UserId,
    pub username: String,
}

/// What provisioning did to the owner row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provisioned {
    Created,
    Updated,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the owner account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] if login fails, without
    /// saying which field was wrong.
    async fn authenticate(&self, username: &str, password: &str)
    -> Result<OwnerSession, AuthError>;

    /// Loads the user a session is bound to, if it still exists.
    async fn resolve_session(&self, user_id: UserId) -> Result<Option<User>, AuthError>;

    /// Creates the owner account, or replaces the credentials of the existing one.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] for an empty or over-long username or
    /// an empty password.
    async fn provision_owner(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Provisioned, AuthError>;
}
