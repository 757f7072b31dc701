use axum::{
    Form,
    extract::{Path, State},
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppState, PageError, flash, page_context, views};
use crate::domain::MovieId;
use crate::services::MovieError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
}

/// Parses the `{id}` path segment; anything but an integer is a 404.
async fn parse_movie_id(
    state: &AppState,
    session: &Session,
    raw: &str,
) -> Result<MovieId, PageError> {
    match raw.parse::<MovieId>() {
        Ok(id) => Ok(id),
        Err(_) => Err(PageError::not_found(page_context(state, session).await?)),
    }
}

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let ctx = page_context(&state, &session).await?;
    let movies = state.movie_service().list_movies().await?;

    Ok(Html(views::index_page(&ctx, &movies)))
}

/// POST /
pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, PageError> {
    match state.movie_service().add_movie(&form.title, &form.year).await {
        Ok(_) => flash::push(&session, flash::ITEM_CREATED).await?,
        Err(MovieError::Validation(e)) => {
            tracing::debug!("Rejected new movie: {e}");
            flash::push(&session, flash::INVALID_INPUT).await?;
        }
        Err(e) => return Err(e.into()),
    }

    Ok(Redirect::to("/"))
}

/// GET /movie/edit/{id}
pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = parse_movie_id(&state, &session, &raw_id).await?;

    let ctx = page_context(&state, &session).await?;
    match state.movie_service().get_movie(id).await {
        Ok(movie) => Ok(Html(views::edit_page(&ctx, &movie))),
        Err(MovieError::NotFound(_)) => Err(PageError::not_found(ctx)),
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/edit/{id}
pub async fn edit_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
    Form(form): Form<MovieForm>,
) -> Result<Redirect, PageError> {
    let id = parse_movie_id(&state, &session, &raw_id).await?;

    match state
        .movie_service()
        .edit_movie(id, &form.title, &form.year)
        .await
    {
        Ok(_) => {
            flash::push(&session, flash::ITEM_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(MovieError::Validation(e)) => {
            tracing::debug!(movie_id = id.value(), "Rejected movie edit: {e}");
            flash::push(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to(&format!("/movie/edit/{id}")))
        }
        Err(MovieError::NotFound(_)) => {
            Err(PageError::not_found(page_context(&state, &session).await?))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/delete/{id}
pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    session: Session,
    Path(raw_id): Path<String>,
) -> Result<Redirect, PageError> {
    let id = parse_movie_id(&state, &session, &raw_id).await?;

    match state.movie_service().delete_movie(id).await {
        Ok(()) => {
            flash::push(&session, flash::ITEM_DELETED).await?;
            Ok(Redirect::to("/"))
        }
        Err(MovieError::NotFound(_)) => {
            Err(PageError::not_found(page_context(&state, &session).await?))
        }
        Err(e) => Err(e.into()),
    }
}

/// Fallback for every unmatched path.
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> PageError {
    match page_context(&state, &session).await {
        Ok(ctx) => PageError::not_found(ctx),
        Err(e) => e,
    }
}
