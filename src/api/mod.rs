use axum::{
    Router, middleware,
    routing::{get, post},
};
use axum::handler::Handler;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, Session, SessionManagerLayer};

use crate::config::Config;
use crate::state::SharedState;

mod assets;
pub mod auth;
mod error;
pub mod flash;
pub mod movies;
mod observability;
pub mod settings;
pub mod views;

pub use error::PageError;
pub use views::PageContext;

use tokio::sync::RwLock;

use crate::services::{AuthService, MovieService, ProfileService};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn movie_service(&self) -> &Arc<dyn MovieService> {
        &self.shared.movie_service
    }

    #[must_use]
    pub fn profile_service(&self) -> &Arc<dyn ProfileService> {
        &self.shared.profile_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn AuthService> {
        &self.shared.auth_service
    }
}

#[must_use]
pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        prometheus_handle,
    })
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared, prometheus_handle))
}

/// Builds the context every page is rendered with. Drains the flash queue.
pub async fn page_context(state: &AppState, session: &Session) -> Result<PageContext, PageError> {
    let owner = state.profile_service().owner().await?;
    let authenticated = auth::session_user_id(session).await?.is_some();
    let flashes = flash::take(session).await?;

    Ok(PageContext {
        owner,
        flashes,
        authenticated,
    })
}

pub async fn router(state: Arc<AppState>) -> Router {
    let (secure_cookies, idle_minutes) = {
        let config = state.config().read().await;
        (
            config.server.secure_cookies,
            config.server.session_idle_minutes,
        )
    };

    let login_gate = middleware::from_fn_with_state(state.clone(), auth::require_login);

    let protected_routes = Router::new()
        .route(
            "/movie/edit/{id}",
            get(movies::edit_form).post(movies::edit_movie),
        )
        .route("/movie/delete/{id}", post(movies::delete_movie))
        .route(
            "/settings",
            get(settings::settings_form).post(settings::update_settings),
        )
        .route("/logout", get(auth::logout))
        .route("/metrics", get(observability::get_metrics))
        .route_layer(login_gate.clone());

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(idle_minutes)));

    Router::new()
        .merge(protected_routes)
        .route(
            "/",
            get(movies::index).post(movies::add_movie.layer(login_gate)),
        )
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/static/{*path}", get(assets::serve_asset))
        .fallback(movies::not_found)
        .layer(session_layer)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
}
