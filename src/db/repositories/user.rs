use anyhow::{Context, Result};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::info;

use crate::domain::UserId;
use crate::entities::users;

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: Option<String>,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: UserId::new(model.id),
            name: model.name,
            username: model.username,
        }
    }
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by ID
    pub async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        let user = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user by ID")?;

        Ok(user.map(User::from))
    }

    /// Get user by ID together with its password hash (auth path only)
    pub async fn get_with_password(&self, id: UserId) -> Result<Option<(User, Option<String>)>> {
        let user = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        Ok(user.map(|u| {
            let password_hash = u.password_hash.clone();
            (User::from(u), password_hash)
        }))
    }

    /// Insert a user under an explicit id
    pub async fn create(
        &self,
        id: UserId,
        name: &str,
        username: Option<&str>,
        password_hash: Option<String>,
    ) -> Result<User> {
        let active = users::ActiveModel {
            id: Set(id.value()),
            name: Set(name.to_string()),
            username: Set(username.map(str::to_string)),
            password_hash: Set(password_hash),
        };

        let model = active
            .insert(&self.conn)
            .await
            .with_context(|| format!("Failed to create user {id}"))?;

        info!(user_id = model.id, "Created user: {}", model.name);
        Ok(User::from(model))
    }

    /// Update the display name. Returns false when the user does not exist.
    pub async fn update_name(&self, id: UserId, name: &str) -> Result<bool> {
        let Some(user) = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for name update")?
        else {
            return Ok(false);
        };

        let mut active: users::ActiveModel = user.into();
        active.name = Set(name.to_string());
        active.update(&self.conn).await?;

        Ok(true)
    }

    /// Replace login credentials. The hash must already be computed.
    pub async fn set_credentials(
        &self,
        id: UserId,
        username: &str,
        password_hash: String,
    ) -> Result<bool> {
        let Some(user) = users::Entity::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query user for credential update")?
        else {
            return Ok(false);
        };

        let mut active: users::ActiveModel = user.into();
        active.username = Set(Some(username.to_string()));
        active.password_hash = Set(Some(password_hash));
        active.update(&self.conn).await?;

        info!(user_id = id.value(), "Updated credentials for {username}");
        Ok(true)
    }
}
