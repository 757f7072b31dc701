//! `SeaORM` implementation of the `ProfileService` trait.

use crate::db::{Store, User};
use crate::domain::validation::validate_profile_name;
use crate::services::profile_service::{ProfileError, ProfileService};
use async_trait::async_trait;
use tracing::info;

pub struct SeaOrmProfileService {
    store: Store,
}

impl SeaOrmProfileService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileService for SeaOrmProfileService {
    async fn owner(&self) -> Result<Option<User>, ProfileError> {
        Ok(self.store.get_owner().await?)
    }

    async fn update_profile_name(&self, name: &str) -> Result<(), ProfileError> {
        validate_profile_name(name)?;

        if !self.store.update_owner_name(name).await? {
            return Err(ProfileError::OwnerNotFound);
        }

        info!("Owner display name changed to {name}");
        Ok(())
    }
}
