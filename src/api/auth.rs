use axum::{
    Form,
    extract::{Request, State},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{AppState, PageError, flash, page_context, views};
use crate::constants::session::OWNER_KEY;
use crate::domain::UserId;
use crate::services::AuthError;

// ============================================================================
// Request Types
// ============================================================================

/// Missing fields deserialize as empty strings and fail validation instead of
/// being rejected by the extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

// ============================================================================
// Middleware
// ============================================================================

/// Attached to responses that passed the login gate, so outer layers can tell
/// who was served.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

/// Lets the request through only when the session is bound to a user that
/// still exists; otherwise queues a notice and redirects to `/login`.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
    next: Next,
) -> Result<Response, PageError> {
    if let Some(user_id) = session_user_id(&session).await? {
        if state.auth_service().resolve_session(user_id).await?.is_some() {
            let mut response = next.run(request).await;
            response.extensions_mut().insert(AuthenticatedUser(user_id));
            return Ok(response);
        }

        tracing::warn!(user_id = user_id.value(), "Session bound to a missing user");
        session.remove::<UserId>(OWNER_KEY).await?;
    }

    flash::push(&session, flash::LOGIN_REQUIRED).await?;
    Ok(Redirect::to("/login").into_response())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_form(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, PageError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(views::login_page(&ctx)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect, PageError> {
    match state
        .auth_service()
        .authenticate(&form.username, &form.password)
        .await
    {
        Ok(owner) => {
            // New id on privilege change so a pre-login id cannot be replayed.
            session.cycle_id().await?;
            session.insert(OWNER_KEY, owner.user_id).await?;
            tracing::info!(user_id = owner.user_id.value(), "Owner logged in");

            flash::push(&session, flash::LOGIN_SUCCESS).await?;
            Ok(Redirect::to("/"))
        }
        Err(AuthError::Validation(_)) => {
            flash::push(&session, flash::INVALID_INPUT).await?;
            Ok(Redirect::to("/login"))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Rejected login attempt");
            flash::push(&session, flash::LOGIN_FAILED).await?;
            Ok(Redirect::to("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(session: Session) -> Result<Redirect, PageError> {
    session.remove::<UserId>(OWNER_KEY).await?;
    session.cycle_id().await?;

    flash::push(&session, flash::GOODBYE).await?;
    Ok(Redirect::to("/"))
}

// ============================================================================
// Helpers
// ============================================================================

/// The user id bound to this session, if logged in.
pub async fn session_user_id(session: &Session) -> Result<Option<UserId>, PageError> {
    Ok(session.get::<UserId>(OWNER_KEY).await?)
}
