//! Domain types for the watchlist with strong typing.
//!
//! Newtype ids keep movie ids from being mixed up with user ids, and the
//! [`validation`] module holds the field bounds every persisted record obeys.

pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Unique identifier for a Movie in the system.
///
/// # Examples
///
/// ```rust
/// use watchlist::domain::MovieId;
///
/// let id = MovieId::new(42);
/// assert_eq!(id.value(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert_eq!("7".parse::<MovieId>().unwrap(), MovieId::new(7));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct MovieId(i32);

impl MovieId {
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MovieId> for i32 {
    fn from(id: MovieId) -> Self {
        id.0
    }
}

impl From<i32> for MovieId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}

/// Parses the decimal id used in `/movie/...` paths.
impl FromStr for MovieId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i32>().map(Self::new)
    }
}

/// Unique identifier for a User row.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// The well-known id of the owner account.
    pub const OWNER: Self = Self(crate::constants::OWNER_ID);

    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self::new(id)
    }
}
