//! `SeaORM` implementation of the `AuthService` trait.

use crate::config::SecurityConfig;
use crate::constants::seed;
use crate::db::{Store, User};
use crate::domain::UserId;
use crate::domain::validation::NAME_MAX_CHARS;
use crate::services::auth_service::{AuthError, AuthService, OwnerSession, Provisioned};
use crate::services::password::{hash_password_blocking, verify_password_blocking};
use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// Verified against when there is no stored hash to check, so a failed login
/// costs one Argon2 run whichever field was wrong.
const DECOY_PASSWORD: &str = "watchlist-decoy-password";

pub struct SeaOrmAuthService {
    store: Store,
    security: SecurityConfig,
    /// Hash of [`DECOY_PASSWORD`] under the configured parameters, built on
    /// first use.
    decoy_hash: OnceCell<String>,
}

impl SeaOrmAuthService {
    #[must_use]
    pub fn new(store: Store, security: SecurityConfig) -> Self {
        Self {
            store,
            security,
            decoy_hash: OnceCell::new(),
        }
    }

    async fn decoy_hash(&self) -> Result<String, AuthError> {
        let hash = self
            .decoy_hash
            .get_or_try_init(|| {
                hash_password_blocking(DECOY_PASSWORD.to_string(), self.security.clone())
            })
            .await?;
        Ok(hash.clone())
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<OwnerSession, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::Validation(
                "Username and password are required".to_string(),
            ));
        }

        let credentials = self.store.get_owner_credentials().await?;
        if credentials.is_none() {
            warn!("Login attempted before an owner account exists");
        }

        // Only a hash whose username matched may grant a login.
        let candidate = credentials.and_then(|(owner, hash)| match (owner.username, hash) {
            (Some(owner_username), Some(hash)) if owner_username == username => {
                Some((owner.id, owner_username, hash))
            }
            (None, _) | (_, None) => {
                warn!("Login attempted before owner credentials were provisioned");
                None
            }
            _ => None,
        });

        // The verifier runs on every path so response time does not reveal
        // which field was wrong.
        let hash = match &candidate {
            Some((_, _, hash)) => hash.clone(),
            None => self.decoy_hash().await?,
        };
        let password_ok = verify_password_blocking(hash, password.to_string()).await?;

        match candidate {
            Some((user_id, username, _)) if password_ok => Ok(OwnerSession { user_id, username }),
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    async fn resolve_session(&self, user_id: UserId) -> Result<Option<User>, AuthError> {
        Ok(self.store.get_user(user_id).await?)
    }

    async fn provision_owner(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Provisioned, AuthError> {
        if username.is_empty() || username.chars().count() > NAME_MAX_CHARS {
            return Err(AuthError::Validation(format!(
                "Username must be 1 to {NAME_MAX_CHARS} characters"
            )));
        }
        if password.is_empty() {
            return Err(AuthError::Validation("Password is required".to_string()));
        }

        let password_hash =
            hash_password_blocking(password.to_string(), self.security.clone()).await?;

        if self
            .store
            .set_owner_credentials(username, password_hash.clone())
            .await?
        {
            info!("Owner credentials updated for {username}");
            return Ok(Provisioned::Updated);
        }

        self.store
            .create_owner(seed::ADMIN_NAME, Some(username), Some(password_hash))
            .await?;
        info!("Owner account created for {username}");
        Ok(Provisioned::Created)
    }
}
