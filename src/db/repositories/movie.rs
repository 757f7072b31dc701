use crate::domain::MovieId;
use crate::entities::{movies, prelude::*};
use crate::models::movie::Movie;
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set,
    TransactionTrait,
};
use tracing::info;

/// Repository for movie records
pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: MovieId) -> Result<Option<Movie>> {
        let movie = Movies::find_by_id(id.value())
            .one(&self.conn)
            .await
            .context("Failed to query movie by ID")?;

        Ok(movie.map(Movie::from))
    }

    /// Ordered by id so pages render in a stable order.
    pub async fn list_all(&self) -> Result<Vec<Movie>> {
        let rows = Movies::find()
            .order_by_asc(movies::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list movies")?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Movies::find()
            .count(&self.conn)
            .await
            .context("Failed to count movies")
    }

    pub async fn insert(&self, title: &str, year: &str) -> Result<Movie> {
        let active_model = movies::ActiveModel {
            title: Set(title.to_string()),
            year: Set(year.to_string()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.conn)
            .await
            .context("Failed to insert movie")?;

        info!(movie_id = model.id, "Added movie: {} ({})", model.title, model.year);
        Ok(Movie::from(model))
    }

    /// Inserts a batch in one transaction.
    pub async fn insert_many(&self, entries: &[(&str, &str)]) -> Result<usize> {
        let txn = self.conn.begin().await?;

        for (title, year) in entries {
            movies::ActiveModel {
                title: Set((*title).to_string()),
                year: Set((*year).to_string()),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .context("Failed to insert movie")?;
        }

        txn.commit().await?;
        Ok(entries.len())
    }

    /// Looks the row up and updates it inside one transaction.
    /// Returns `None` when the row no longer exists.
    pub async fn update(&self, id: MovieId, title: &str, year: &str) -> Result<Option<Movie>> {
        let txn = self.conn.begin().await?;

        let Some(existing) = Movies::find_by_id(id.value())
            .one(&txn)
            .await
            .context("Failed to query movie for update")?
        else {
            txn.rollback().await?;
            return Ok(None);
        };

        let mut active: movies::ActiveModel = existing.into();
        active.title = Set(title.to_string());
        active.year = Set(year.to_string());
        let model = active
            .update(&txn)
            .await
            .context("Failed to update movie")?;

        txn.commit().await?;

        info!(movie_id = model.id, "Updated movie: {} ({})", model.title, model.year);
        Ok(Some(Movie::from(model)))
    }

    pub async fn remove(&self, id: MovieId) -> Result<bool> {
        let result = Movies::delete_by_id(id.value())
            .exec(&self.conn)
            .await
            .context("Failed to delete movie")?;

        if result.rows_affected > 0 {
            info!(movie_id = id.value(), "Removed movie");
        }

        Ok(result.rows_affected > 0)
    }
}
