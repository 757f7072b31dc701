use crate::domain::{MovieId, UserId};
use crate::models::movie::Movie;
use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::user::User;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url
                .trim_start_matches("sqlite://")
                .trim_start_matches("sqlite:");
            let path_str = path_str.split('?').next().unwrap_or(path_str);
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)
                    .with_context(|| format!("Failed to create database file: {path_str}"))?;
            }
        }

        // Every pooled connection to `sqlite::memory:` opens its own empty
        // database, so in-memory stores are pinned to one connection.
        let (max_connections, min_connections) = if in_memory {
            (1, 1)
        } else {
            (max_connections, min_connections)
        };

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        if !in_memory {
            opt.idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .with_context(|| format!("Failed to connect to database: {db_url}"))?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    /// Drops every table and re-applies all migrations.
    pub async fn reset_schema(&self) -> Result<()> {
        use sea_orm_migration::MigratorTrait;

        migrator::Migrator::fresh(&self.conn)
            .await
            .context("Failed to rebuild database schema")?;
        info!("Database schema dropped and recreated");
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    pub async fn get_movie(&self, id: MovieId) -> Result<Option<Movie>> {
        self.movie_repo().get(id).await
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>> {
        self.movie_repo().list_all().await
    }

    pub async fn count_movies(&self) -> Result<u64> {
        self.movie_repo().count().await
    }

    pub async fn insert_movie(&self, title: &str, year: &str) -> Result<Movie> {
        self.movie_repo().insert(title, year).await
    }

    pub async fn insert_movies(&self, movies: &[(&str, &str)]) -> Result<usize> {
        self.movie_repo().insert_many(movies).await
    }

    pub async fn update_movie(&self, id: MovieId, title: &str, year: &str) -> Result<Option<Movie>> {
        self.movie_repo().update(id, title, year).await
    }

    pub async fn delete_movie(&self, id: MovieId) -> Result<bool> {
        self.movie_repo().remove(id).await
    }

    pub async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.user_repo().get_by_id(id).await
    }

    pub async fn get_owner(&self) -> Result<Option<User>> {
        self.user_repo().get_by_id(UserId::OWNER).await
    }

    pub async fn get_owner_credentials(&self) -> Result<Option<(User, Option<String>)>> {
        self.user_repo().get_with_password(UserId::OWNER).await
    }

    pub async fn create_owner(
        &self,
        name: &str,
        username: Option<&str>,
        password_hash: Option<String>,
    ) -> Result<User> {
        self.user_repo()
            .create(UserId::OWNER, name, username, password_hash)
            .await
    }

    pub async fn update_owner_name(&self, name: &str) -> Result<bool> {
        self.user_repo().update_name(UserId::OWNER, name).await
    }

    pub async fn set_owner_credentials(&self, username: &str, password_hash: String) -> Result<bool> {
        self.user_repo()
            .set_credentials(UserId::OWNER, username, password_hash)
            .await
    }
}
