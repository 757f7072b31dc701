//! Domain service for the owner's profile.
//!
//! Provides the owner record shown on every page and the display-name update
//! behind `/settings`.

use thiserror::Error;

use crate::db::User;
use crate::domain::validation::ValidationError;

/// Errors specific to profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("Owner account does not exist")]
    OwnerNotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProfileError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProfileError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for the owner profile.
#[async_trait::async_trait]
pub trait ProfileService: Send + Sync {
    /// The owner account, if one has been created.
    async fn owner(&self) -> Result<Option<User>, ProfileError>;

    /// Changes the owner's display name.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Validation`] for an empty or over-long name.
    async fn update_profile_name(&self, name: &str) -> Result<(), ProfileError>;
}
