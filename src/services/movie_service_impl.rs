//! `SeaORM` implementation of the `MovieService` trait.

use crate::db::Store;
use crate::domain::MovieId;
use crate::domain::validation::validate_movie;
use crate::models::movie::Movie;
use crate::services::movie_service::{MovieError, MovieService};
use async_trait::async_trait;
use tokio::sync::Mutex;

pub struct SeaOrmMovieService {
    store: Store,
    /// Serializes fetch-validate-commit sequences.
    write_lock: Mutex<()>,
}

impl SeaOrmMovieService {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl MovieService for SeaOrmMovieService {
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        Ok(self.store.list_movies().await?)
    }

    async fn get_movie(&self, id: MovieId) -> Result<Movie, MovieError> {
        self.store
            .get_movie(id)
            .await?
            .ok_or(MovieError::NotFound(id))
    }

    async fn add_movie(&self, title: &str, year: &str) -> Result<Movie, MovieError> {
        validate_movie(title, year)?;

        let _guard = self.write_lock.lock().await;
        let movie = self.store.insert_movie(title, year).await?;
        metrics::counter!("movies_created_total").increment(1);

        Ok(movie)
    }

    async fn edit_movie(
        &self,
        id: MovieId,
        title: &str,
        year: &str,
    ) -> Result<Movie, MovieError> {
        let _guard = self.write_lock.lock().await;

        if self.store.get_movie(id).await?.is_none() {
            return Err(MovieError::NotFound(id));
        }

        validate_movie(title, year)?;

        let movie = self
            .store
            .update_movie(id, title, year)
            .await?
            .ok_or(MovieError::NotFound(id))?;
        metrics::counter!("movies_updated_total").increment(1);

        Ok(movie)
    }

    async fn delete_movie(&self, id: MovieId) -> Result<(), MovieError> {
        let _guard = self.write_lock.lock().await;

        if !self.store.delete_movie(id).await? {
            return Err(MovieError::NotFound(id));
        }
        metrics::counter!("movies_deleted_total").increment(1);

        Ok(())
    }
}
