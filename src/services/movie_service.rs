//! Domain service for the movie watchlist.
//!
//! Every mutation validates its input before touching storage; nothing is
//! written and then repaired.

use thiserror::Error;

use crate::domain::MovieId;
use crate::domain::validation::ValidationError;
use crate::models::movie::Movie;

/// Errors specific to movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(MovieId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for movie records.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists every movie on the watchlist.
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// Gets one movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] for an unknown id.
    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError>;

    /// Adds a movie after validating title and year.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] without writing anything when a
    /// field is empty or too long.
    async fn add_movie(&self, title: &str, year: &str) -> Result<Movie, MovieError>;

    /// Replaces title and year of an existing movie.
    ///
    /// The record is looked up first, so an unknown id reports
    /// [`MovieError::NotFound`] even when the input is also invalid.
    async fn edit_movie(&self, id: MovieId, title: &str, year: &str)
    -> Result<Movie, MovieError>;

    /// Deletes one movie.
    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError>;
}
