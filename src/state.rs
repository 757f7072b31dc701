use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, MovieService, ProfileService, SeaOrmAuthService, SeaOrmMovieService,
    SeaOrmProfileService,
};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<RwLock<Config>>,

    pub store: Store,

    pub movie_service: Arc<dyn MovieService>,

    pub profile_service: Arc<dyn ProfileService>,

    pub auth_service: Arc<dyn AuthService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let movie_service = Arc::new(SeaOrmMovieService::new(store.clone()))
            as Arc<dyn MovieService + Send + Sync + 'static>;

        let profile_service = Arc::new(SeaOrmProfileService::new(store.clone()))
            as Arc<dyn ProfileService + Send + Sync + 'static>;

        let auth_service = Arc::new(SeaOrmAuthService::new(
            store.clone(),
            config.security.clone(),
        )) as Arc<dyn AuthService + Send + Sync + 'static>;

        Self {
            config: Arc::new(RwLock::new(config)),
            store,
            movie_service,
            profile_service,
            auth_service,
        }
    }
}
