use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, field};
use uuid::Uuid;

use super::AppState;
use super::auth::AuthenticatedUser;

/// Label used for requests that matched no route, so random paths do not
/// mint new series.
const UNROUTED: &str = "<fallback>";

const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; img-src 'self' data:; \
    style-src 'self'; form-action 'self'; frame-ancestors 'none'; base-uri 'self'";

const SECURITY_HEADERS: [(&str, &str); 4] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
    ("content-security-policy", CONTENT_SECURITY_POLICY),
];

/// GET /metrics
///
/// 404 when the server runs without a recorder.
pub async fn get_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.prometheus_handle {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Coarse classification of a response for the access log.
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status.is_client_error() {
        "rejected"
    } else if status.is_redirection() {
        "redirect"
    } else {
        "ok"
    }
}

/// Opens a span per request, then logs and counts the finished response.
///
/// The route template (not the raw path) is used as the metric label. The
/// owner id is read back from the response once the login gate has run.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNROUTED, MatchedPath::as_str)
        .to_owned();

    let span = tracing::info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        %method,
        path = req.uri().path(),
        route = %route,
        user_id = field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let elapsed = started.elapsed();
        let status = response.status();

        if let Some(AuthenticatedUser(user_id)) =
            response.extensions().get::<AuthenticatedUser>()
        {
            tracing::Span::current().record("user_id", user_id.value());
        }

        let labels = [
            ("method", method.to_string()),
            ("route", route),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!("watchlist_http_requests_total", &labels).increment(1);
        metrics::histogram!("watchlist_http_request_seconds", &labels)
            .record(elapsed.as_secs_f64());

        tracing::info!(
            status = status.as_u16(),
            outcome = outcome(status),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "Handled request"
        );

        response
    }
    .instrument(span)
    .await
}

/// Stamps every response with the fixed browser hardening headers.
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    for (name, value) in SECURITY_HEADERS {
        response
            .headers_mut()
            .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_buckets() {
        assert_eq!(outcome(StatusCode::OK), "ok");
        assert_eq!(outcome(StatusCode::SEE_OTHER), "redirect");
        assert_eq!(outcome(StatusCode::NOT_FOUND), "rejected");
        assert_eq!(outcome(StatusCode::INTERNAL_SERVER_ERROR), "server_error");
    }

    #[test]
    fn test_security_header_values_are_valid() {
        for (name, value) in SECURITY_HEADERS {
            assert!(HeaderName::from_bytes(name.as_bytes()).is_ok(), "{name}");
            assert!(HeaderValue::from_str(value).is_ok(), "{name}");
        }
        assert!(!CONTENT_SECURITY_POLICY.contains("  "));
    }
}
