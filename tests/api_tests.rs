use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;
use watchlist::api::AppState;
use watchlist::api::auth::AuthenticatedUser;
use watchlist::config::Config;
use watchlist::domain::UserId;
use watchlist::services::AuthService;

const USERNAME: &str = "admin";
const PASSWORD: &str = "hunter22";

fn test_config() -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;
    config.security.argon2_memory_cost_kib = 64;
    config.security.argon2_time_cost = 1;
    config
}

/// Router plus the session cookie carried between requests, like a browser.
struct TestClient {
    app: Router,
    state: Arc<AppState>,
    cookie: Option<String>,
}

impl TestClient {
    async fn new() -> Self {
        let state = watchlist::api::create_app_state_from_config(test_config(), None)
            .await
            .expect("Failed to create app state");
        let app = watchlist::api::router(state.clone()).await;

        Self {
            app,
            state,
            cookie: None,
        }
    }

    /// A client whose database already holds the demo data and an owner login.
    async fn seeded() -> Self {
        let client = Self::new().await;
        watchlist::bootstrap::forge(client.state.store())
            .await
            .expect("forge failed");
        client
            .state
            .auth_service()
            .provision_owner(USERNAME, PASSWORD)
            .await
            .expect("provisioning failed");
        client
    }

    async fn send(&mut self, method: &str, uri: &str, form: Option<&str>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = match form {
            Some(form) => {
                builder = builder.header(
                    header::CONTENT_TYPE,
                    "application/x-www-form-urlencoded",
                );
                Body::from(form.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_string();
            self.cookie = Some(pair);
        }

        response
    }

    async fn get(&mut self, uri: &str) -> Response {
        self.send("GET", uri, None).await
    }

    async fn post(&mut self, uri: &str, form: &str) -> Response {
        self.send("POST", uri, Some(form)).await
    }

    async fn get_text(&mut self, uri: &str) -> (StatusCode, String) {
        let response = self.get(uri).await;
        let status = response.status();
        (status, body_text(response).await)
    }

    async fn login(&mut self) {
        let response = self
            .post("/login", &format!("username={USERNAME}&password={PASSWORD}"))
            .await;
        assert_redirect(&response, "/");
    }

    async fn movie_count(&self) -> u64 {
        self.state.store().count_movies().await.unwrap()
    }
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn assert_redirect(response: &Response, location: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        location,
        "unexpected redirect target"
    );
}

#[tokio::test]
async fn test_index_is_public() {
    let mut client = TestClient::seeded().await;

    let (status, body) = client.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h2>Jesse's Watchlist</h2>"));
    assert!(body.contains("10 Titles"));
    assert!(body.contains("My Neighbor Totoro - 1988"));
    assert!(body.contains(r#"href="/login""#));
    // Anonymous visitors get no add form and no per-movie controls.
    assert!(!body.contains(r#"action="/movie/delete/1""#));
    assert!(!body.contains(r#"name="title""#));
}

#[tokio::test]
async fn test_empty_database_renders_generic_heading() {
    let mut client = TestClient::new().await;

    let (status, body) = client.get_text("/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<h2>Watchlist</h2>"));
    assert!(body.contains("0 Titles"));
}

#[tokio::test]
async fn test_gated_routes_redirect_to_login() {
    let mut client = TestClient::seeded().await;

    let response = client.post("/", "title=Heat&year=1995").await;
    assert_redirect(&response, "/login");
    assert_eq!(client.movie_count().await, 10);

    let response = client.post("/movie/delete/1", "").await;
    assert_redirect(&response, "/login");
    assert_eq!(client.movie_count().await, 10);

    for uri in ["/settings", "/movie/edit/1", "/logout", "/metrics"] {
        let response = client.get(uri).await;
        assert_redirect(&response, "/login");
    }

    let (_, body) = client.get_text("/login").await;
    assert!(body.contains("Please log in to access this page."));
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let mut client = TestClient::seeded().await;

    let response = client
        .post("/login", "username=admin&password=wrong")
        .await;
    assert_redirect(&response, "/login");
    let (_, body) = client.get_text("/login").await;
    assert!(body.contains("Invalid username or password."));

    let response = client
        .post("/login", &format!("username=nobody&password={PASSWORD}"))
        .await;
    assert_redirect(&response, "/login");
    let (_, body) = client.get_text("/login").await;
    assert!(body.contains("Invalid username or password."));

    let response = client.post("/login", "username=&password=").await;
    assert_redirect(&response, "/login");
    let (_, body) = client.get_text("/login").await;
    assert!(body.contains("Invalid input."));

    // Still anonymous.
    let response = client.get("/settings").await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_login_without_owner_account_fails() {
    let mut client = TestClient::new().await;

    let response = client
        .post("/login", &format!("username={USERNAME}&password={PASSWORD}"))
        .await;

    assert_redirect(&response, "/login");
    let (_, body) = client.get_text("/login").await;
    assert!(body.contains("Invalid username or password."));
}

#[tokio::test]
async fn test_flash_is_shown_once() {
    let mut client = TestClient::seeded().await;
    client.login().await;

    let (_, body) = client.get_text("/").await;
    assert!(body.contains(r#"<div class="alert">Login success.</div>"#));
    assert!(body.contains(r#"href="/logout""#));

    let (_, body) = client.get_text("/").await;
    assert!(!body.contains("Login success."));
}

#[tokio::test]
async fn test_add_movie() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let response = client.post("/", "title=Heat&year=1995").await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Item created."));
    assert!(body.contains("11 Titles"));
    assert!(body.contains("Heat - 1995"));
    assert!(body.contains("https://www.imdb.com/find?q=Heat"));
}

#[tokio::test]
async fn test_add_movie_rejects_invalid_input() {
    let mut client = TestClient::seeded().await;
    client.login().await;

    for form in [
        "title=&year=1995",
        "title=Heat&year=",
        "title=Heat&year=19955",
        "year=1995",
    ] {
        let response = client.post("/", form).await;
        assert_redirect(&response, "/");

        let (_, body) = client.get_text("/").await;
        assert!(body.contains("Invalid input."), "no notice for {form}");
    }

    let long_title = "x".repeat(61);
    let response = client
        .post("/", &format!("title={long_title}&year=1995"))
        .await;
    assert_redirect(&response, "/");

    assert_eq!(client.movie_count().await, 10);
}

#[tokio::test]
async fn test_titles_are_escaped() {
    let mut client = TestClient::seeded().await;
    client.login().await;

    let response = client
        .post("/", "title=%3Cscript%3Ealert(1)%3C%2Fscript%3E&year=2024")
        .await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
}

#[tokio::test]
async fn test_edit_movie() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let (status, body) = client.get_text("/movie/edit/1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="My Neighbor Totoro""#));
    assert!(body.contains(r#"value="1988""#));

    let response = client
        .post("/movie/edit/1", "title=Totoro&year=1989")
        .await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Item updated."));
    assert!(body.contains("Totoro - 1989"));
    assert!(!body.contains("My Neighbor Totoro"));
}

#[tokio::test]
async fn test_invalid_edit_keeps_movie_unchanged() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let response = client.post("/movie/edit/1", "title=&year=1988").await;
    assert_redirect(&response, "/movie/edit/1");

    let (_, body) = client.get_text("/movie/edit/1").await;
    assert!(body.contains("Invalid input."));
    assert!(body.contains(r#"value="My Neighbor Totoro""#));
}

#[tokio::test]
async fn test_delete_movie() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let response = client.post("/movie/delete/1", "").await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Item deleted."));
    assert!(body.contains("9 Titles"));
    assert!(!body.contains("My Neighbor Totoro"));

    let response = client.post("/movie/delete/1", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_pages_are_404() {
    let mut client = TestClient::seeded().await;

    let (status, body) = client.get_text("/no/such/page").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Page Not Found - 404"));
    assert!(body.contains("<h2>Jesse's Watchlist</h2>"));

    client.login().await;

    for uri in ["/movie/edit/999", "/movie/edit/abc", "/movie/edit/1.5"] {
        let (status, body) = client.get_text(uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
        assert!(body.contains("Page Not Found - 404"));
    }

    let response = client.post("/movie/edit/999", "title=Heat&year=1995").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.post("/movie/delete/abc", "").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(client.movie_count().await, 10);
}

#[tokio::test]
async fn test_settings_update() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let (status, body) = client.get_text("/settings").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"value="Jesse""#));

    let response = client.post("/settings", "name=Grey").await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Settings updated."));
    assert!(body.contains("<h2>Grey's Watchlist</h2>"));

    let response = client.post("/settings", "name=").await;
    assert_redirect(&response, "/settings");

    let long_name = "n".repeat(21);
    let response = client.post("/settings", &format!("name={long_name}")).await;
    assert_redirect(&response, "/settings");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Invalid input."));
    assert!(body.contains("<h2>Grey's Watchlist</h2>"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let mut client = TestClient::seeded().await;
    client.login().await;
    client.get("/").await;

    let response = client.get("/logout").await;
    assert_redirect(&response, "/");

    let (_, body) = client.get_text("/").await;
    assert!(body.contains("Goodbye."));
    assert!(body.contains(r#"href="/login""#));

    let response = client.get("/settings").await;
    assert_redirect(&response, "/login");
}

#[tokio::test]
async fn test_gated_responses_carry_the_served_user() {
    let mut client = TestClient::seeded().await;

    let response = client.get("/").await;
    assert!(response.extensions().get::<AuthenticatedUser>().is_none());

    client.login().await;
    let response = client.get("/settings").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.extensions().get::<AuthenticatedUser>(),
        Some(&AuthenticatedUser(UserId::OWNER))
    );

    // Public pages stay anonymous even with a live session.
    let response = client.get("/").await;
    assert!(response.extensions().get::<AuthenticatedUser>().is_none());
}

#[tokio::test]
async fn test_metrics_without_recorder_is_404() {
    let mut client = TestClient::seeded().await;
    client.login().await;

    let response = client.get("/metrics").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_session_cookie_is_rotated_on_login() {
    let mut client = TestClient::seeded().await;

    client.get("/settings").await;
    let anonymous_cookie = client.cookie.clone().expect("flash should open a session");

    client.login().await;
    let owner_cookie = client.cookie.clone().unwrap();

    assert_ne!(anonymous_cookie, owner_cookie);
}

#[tokio::test]
async fn test_static_assets() {
    let mut client = TestClient::new().await;

    let response = client.get("/static/style.css").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/css"
    );

    let response = client.get("/static/missing.css").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_security_headers() {
    let mut client = TestClient::new().await;

    let response = client.get("/").await;

    let headers = response.headers();
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert!(headers.get("content-security-policy").is_some());
}
