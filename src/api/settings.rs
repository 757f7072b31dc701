use axum::{
    Form,
    extract::State,
    response::{Html, Redirect},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppState, PageError, flash, page_context, views};
use crate::services::ProfileError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    pub name: String,
}

/// GET /settings
pub async fn settings_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(views::settings_page(&ctx)))
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Redirect, PageError> {
    match state.profile_service().update_profile_name(&form.name).await {
        Ok(()) => {
            flash::push(&session, flash::SETTINGS_UPDATED).await?;
            Ok(Redirect::to("/"))
        }
        Err(ProfileError::Validation(e)) => {
            tracing::debug!("Rejected profile name: {e}");
            flash::push(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to("/settings"))
        }
        Err(ProfileError::OwnerNotFound) => {
            Err(PageError::not_found(page_context(&state, &session).await?))
        }
        Err(e) => Err(e.into()),
    }
}
