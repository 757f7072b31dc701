use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::views::{self, PageContext};
use crate::services::{AuthError, MovieError, ProfileError};

/// Failure of a page request that cannot be answered with a redirect.
///
/// Validation failures never reach this type: handlers turn them into a flash
/// message and a redirect.
#[derive(Debug)]
pub enum PageError {
    /// Rendered as the 404 page. Carries the context so the page still shows
    /// the owner's heading and navigation.
    NotFound(Box<PageContext>),

    DatabaseError(String),

    SessionError(String),

    InternalError(String),
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageError::NotFound(_) => write!(f, "Not found"),
            PageError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            PageError::SessionError(msg) => write!(f, "Session error: {}", msg),
            PageError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            PageError::NotFound(ctx) => {
                (StatusCode::NOT_FOUND, Html(views::not_found_page(&ctx))).into_response()
            }
            PageError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
            }
            PageError::SessionError(msg) => {
                tracing::error!("Session error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
            }
            PageError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response()
            }
        }
    }
}

impl From<anyhow::Error> for PageError {
    fn from(err: anyhow::Error) -> Self {
        PageError::InternalError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for PageError {
    fn from(err: tower_sessions::session::Error) -> Self {
        PageError::SessionError(err.to_string())
    }
}

impl From<MovieError> for PageError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(_) => PageError::not_found(PageContext::default()),
            MovieError::Database(msg) => PageError::DatabaseError(msg),
            other => PageError::InternalError(other.to_string()),
        }
    }
}

impl From<ProfileError> for PageError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::OwnerNotFound => PageError::not_found(PageContext::default()),
            ProfileError::Database(msg) => PageError::DatabaseError(msg),
            other => PageError::InternalError(other.to_string()),
        }
    }
}

impl From<AuthError> for PageError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(msg) => PageError::DatabaseError(msg),
            other => PageError::InternalError(other.to_string()),
        }
    }
}

impl PageError {
    pub fn not_found(ctx: PageContext) -> Self {
        PageError::NotFound(Box::new(ctx))
    }
}
