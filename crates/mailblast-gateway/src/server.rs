//! HTTP server wiring — router, shared state, and startup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use mailblast_campaign::CampaignHandle;
use mailblast_core::config::MailblastConfig;
use mailblast_core::error::{MailblastError, Result};

use crate::auth;
use crate::pages;
use crate::routes;

/// Shared state for the gateway server.
pub struct AppState {
    pub config: MailblastConfig,
    pub campaign: CampaignHandle,
    /// Rate limiter: username → (attempt_count, first_attempt_time)
    pub login_attempts: Mutex<HashMap<String, (u32, Instant)>>,
}

impl AppState {
    pub fn new(config: MailblastConfig, campaign: CampaignHandle) -> Self {
        Self {
            config,
            campaign,
            login_attempts: Mutex::new(HashMap::new()),
        }
    }
}

/// Login page; bounces straight to the dashboard when already logged in.
async fn login_page(headers: HeaderMap) -> Response {
    if auth::has_session(&headers) {
        Redirect::to("/dashboard").into_response()
    } else {
        Html(pages::LOGIN_HTML).into_response()
    }
}

async fn dashboard_page() -> Html<&'static str> {
    Html(pages::DASHBOARD_HTML)
}

/// Build the Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    // Protected routes — require the session cookie
    let protected = Router::new()
        .route("/dashboard", get(dashboard_page))
        .route("/api/logout", post(auth::logout))
        .route("/api/roster/find", post(routes::roster_find))
        .route("/api/roster/csv", post(routes::roster_csv))
        .route("/api/roster/manual", post(routes::roster_manual))
        .route("/api/campaign", get(routes::campaign_view))
        .route("/api/campaign/start", post(routes::campaign_start))
        .route("/api/campaign/pause", post(routes::campaign_pause))
        .route("/api/campaign/resume", post(routes::campaign_resume))
        .route("/api/campaign/stop", post(routes::campaign_stop))
        .route("/api/templates", get(routes::templates))
        .route("/api/summary", post(routes::summary))
        .route_layer(axum::middleware::from_fn(auth::require_session));

    // Public routes — no auth
    let public = Router::new()
        .route("/", get(login_page))
        .route("/api/login", post(auth::login))
        .route("/api/health", get(routes::health));

    protected
        .merge(public)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn start(state: Arc<AppState>) -> Result<()> {
    let addr = format!(
        "{}:{}",
        state.config.dashboard.host, state.config.dashboard.port
    );
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| MailblastError::Gateway(format!("Bind {addr}: {e}")))?;
    tracing::info!("🌐 Dashboard listening on http://{addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| MailblastError::Gateway(format!("Server error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblast_campaign::{spawn_campaign, MemoryStore};
    use mailblast_core::traits::SnapshotStore;
    use mailblast_delivery::StubMailer;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let store: Arc<dyn SnapshotStore> = Arc::new(MemoryStore::new());
        let campaign = spawn_campaign(store, Arc::new(StubMailer::new()));
        Arc::new(AppState::new(MailblastConfig::default(), campaign))
    }

    fn request(method: &str, uri: &str, cookie: Option<&str>, body: Option<&str>) -> axum::http::Request<axum::body::Body> {
        let mut builder = axum::http::Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header("Cookie", cookie);
        }
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(axum::body::Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(axum::body::Body::empty()).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = build_router(test_state());
        let resp = app.oneshot(request("GET", "/api/health", None, None)).await.unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_api_requires_cookie() {
        let app = build_router(test_state());
        let resp = app
            .clone()
            .oneshot(request("GET", "/api/campaign", None, None))
            .await
            .unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);

        // Presence-only check: any cookie value passes the edge
        let resp = app
            .oneshot(request("GET", "/api/campaign", Some("mailblast_session=x"), None))
            .await
            .unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_dashboard_redirects_without_cookie() {
        let app = build_router(test_state());
        let resp = app.oneshot(request("GET", "/dashboard", None, None)).await.unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get("location").unwrap(), "/");
    }

    #[tokio::test]
    async fn test_login_page_redirects_when_logged_in() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(request("GET", "/", Some("mailblast_session=x"), None))
            .await
            .unwrap();
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get("location").unwrap(), "/dashboard");
    }

    #[tokio::test]
    async fn test_login_sets_cookie_on_valid_credentials() {
        let app = build_router(test_state());
        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/login",
                None,
                Some(r#"{"username":"admin","password":"MailBlast@2026"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::OK);
        let cookie = resp.headers().get("set-cookie").unwrap().to_str().unwrap();
        assert!(cookie.starts_with("mailblast_session="));
        assert!(cookie.contains("HttpOnly"));

        let resp = app
            .oneshot(request(
                "POST",
                "/api/login",
                None,
                Some(r#"{"username":"admin","password":"wrong"}"#),
            ))
            .await
            .unwrap();
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_roster_and_campaign_flow_over_http() {
        let app = build_router(test_state());
        let cookie = Some("mailblast_session=x");

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/roster/manual",
                cookie,
                Some(r#"{"content":"ana@example.com,Ana\nben@example.com,Ben"}"#),
            ))
            .await
            .unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1 << 16).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["count"], 2);

        let resp = app
            .clone()
            .oneshot(request(
                "POST",
                "/api/campaign/start",
                cookie,
                Some(r#"{"templateId":"intro-outreach","from":"team@example.com"}"#),
            ))
            .await
            .unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1 << 16).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], true, "{json}");

        let resp = app
            .oneshot(request("GET", "/api/campaign", cookie, None))
            .await
            .unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1 << 16).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["campaign"]["state"], "running");
        assert_eq!(json["campaign"]["recipients"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_csv_returns_error_payload() {
        let app = build_router(test_state());
        let resp = app
            .oneshot(request(
                "POST",
                "/api/roster/csv",
                Some("mailblast_session=x"),
                Some(r#"{"content":"name,phone\nAna,123"}"#),
            ))
            .await
            .unwrap();
        let body = axum::body::to_bytes(resp.into_body(), 1 << 16).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"].as_str().unwrap().contains("email"));
    }
}
