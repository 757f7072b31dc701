//! Field bounds for movie records and the owner profile.
//!
//! Lengths count characters, not bytes. Nothing is trimmed: a title made of
//! spaces is a valid title.

use thiserror::Error;

pub const TITLE_MAX_CHARS: usize = 60;
pub const YEAR_MAX_CHARS: usize = 4;
pub const NAME_MAX_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Empty { field: &'static str },

    #[error("{field} must be {max} characters or less")]
    TooLong { field: &'static str, max: usize },
}

fn check(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(())
}

pub fn validate_movie(title: &str, year: &str) -> Result<(), ValidationError> {
    check("title", title, TITLE_MAX_CHARS)?;
    check("year", year, YEAR_MAX_CHARS)
}

pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    check("name", name, NAME_MAX_CHARS)
}
