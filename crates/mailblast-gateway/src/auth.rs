//! Session auth — static credential login, cookie minting, and the
//! presence-only route guard.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::server::AppState;

pub const SESSION_COOKIE: &str = "mailblast_session";

const MAX_ATTEMPTS: u32 = 5;
const ATTEMPT_WINDOW: Duration = Duration::from_secs(5 * 60);
const SESSION_MAX_AGE_SECS: u64 = 24 * 60 * 60;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Whether the request carries the session cookie. Presence only — the
/// value is not validated at the edge.
pub fn has_session(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|cookies| {
            cookies
                .split(';')
                .any(|c| c.trim_start().starts_with(&format!("{SESSION_COOKIE}=")))
        })
        .unwrap_or(false)
}

/// Mint an unpredictable session token.
fn mint_token() -> String {
    let mut hasher = Sha256::new();
    hasher.update(uuid::Uuid::new_v4().as_bytes());
    hasher.update(
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos()
            .to_le_bytes(),
    );
    hasher.update(rand::random::<u64>().to_le_bytes());
    format!("{:x}", hasher.finalize())
}

/// POST /api/login — static credential check against the dashboard
/// config. Failures are throttled per username.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Response {
    {
        let mut attempts = state.login_attempts.lock().unwrap();
        let now = Instant::now();
        if let Some((count, first_at)) = attempts.get(&req.username) {
            if *count >= MAX_ATTEMPTS && now.duration_since(*first_at) < ATTEMPT_WINDOW {
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    Json(serde_json::json!({
                        "success": false,
                        "error": "Too many login attempts. Please wait 5 minutes."
                    })),
                )
                    .into_response();
            }
            if now.duration_since(*first_at) >= ATTEMPT_WINDOW {
                attempts.remove(&req.username);
            }
        }
        let entry = attempts.entry(req.username.clone()).or_insert((0, now));
        entry.0 += 1;
    }

    let dashboard = &state.config.dashboard;
    if req.username != dashboard.username || req.password != dashboard.password {
        tracing::warn!("🔒 Failed login attempt for '{}'", req.username);
        return (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "success": false,
                "error": "Invalid username or password"
            })),
        )
            .into_response();
    }

    state.login_attempts.lock().unwrap().remove(&req.username);
    let token = mint_token();
    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; SameSite=Lax"
    );
    tracing::info!("🔑 Operator '{}' logged in", req.username);
    (
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({"success": true})),
    )
        .into_response()
}

/// POST /api/logout — clears the cookie.
pub async fn logout() -> Response {
    let cookie = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
    (
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({"success": true})),
    )
        .into_response()
}

/// Route guard for protected routes: without the cookie, API calls get
/// 401 and page loads redirect to the login route.
pub async fn require_session(
    req: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> Response {
    if has_session(req.headers()) {
        return next.run(req).await;
    }
    if req.uri().path().starts_with("/api/") {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"success": false, "error": "Not logged in"})),
        )
            .into_response()
    } else {
        Redirect::to("/").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_session_detects_cookie() {
        let mut headers = HeaderMap::new();
        assert!(!has_session(&headers));

        headers.insert(header::COOKIE, "other=1; mailblast_session=abc".parse().unwrap());
        assert!(has_session(&headers));

        headers.insert(header::COOKIE, "mailblast_sessionx=abc".parse().unwrap());
        assert!(!has_session(&headers));
    }

    #[test]
    fn test_tokens_are_unique_hex() {
        let a = mint_token();
        let b = mint_token();
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
