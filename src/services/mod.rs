pub mod password;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, OwnerSession, Provisioned};
pub use auth_service_impl::SeaOrmAuthService;

pub mod movie_service;
pub mod movie_service_impl;
pub use movie_service::{MovieError, MovieService};
pub use movie_service_impl::SeaOrmMovieService;

pub mod profile_service;
pub mod profile_service_impl;
pub use profile_service::{ProfileError, ProfileService};
pub use profile_service_impl::SeaOrmProfileService;
