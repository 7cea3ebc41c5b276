//! JSON API handlers the dashboard drives. Adapter failures become
//! `{"success": false, "error": …}` responses; nothing on the request
//! path panics.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use mailblast_ai::LlmClient;
use mailblast_campaign::engine::ComposeSpec;
use mailblast_core::error::MailblastError;

use crate::server::AppState;

fn failure(e: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(serde_json::json!({"success": false, "error": e.to_string()}))
}

/// GET /api/health — unauthenticated liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "mailblast",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[derive(Deserialize)]
pub struct FindRequest {
    #[serde(default, rename = "companyName")]
    pub company_name: Option<String>,
    pub role: String,
}

/// POST /api/roster/find — AI contact finder, replaces the roster.
pub async fn roster_find(
    State(state): State<Arc<AppState>>,
    Json(req): Json<FindRequest>,
) -> Json<serde_json::Value> {
    let client = LlmClient::from_config(&state.config.ai);
    let contacts =
        match mailblast_ai::find_contacts(&client, req.company_name.as_deref(), &req.role).await {
            Ok(contacts) => contacts,
            Err(e) => return failure(e),
        };
    // Empty result is valid for the finder; nothing to load though
    if contacts.is_empty() {
        return Json(serde_json::json!({"success": true, "count": 0, "contacts": []}));
    }
    match state.campaign.load_roster(contacts.clone()).await {
        Ok(count) => Json(serde_json::json!({
            "success": true, "count": count, "contacts": contacts
        })),
        Err(e) => failure(e),
    }
}

#[derive(Deserialize)]
pub struct ImportRequest {
    pub content: String,
}

/// POST /api/roster/csv — CSV text upload, replaces the roster.
pub async fn roster_csv(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportRequest>,
) -> Json<serde_json::Value> {
    load_parsed(&state, mailblast_contacts::parse_csv(&req.content)).await
}

/// POST /api/roster/manual — pasted `email,name` lines, replaces the roster.
pub async fn roster_manual(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ImportRequest>,
) -> Json<serde_json::Value> {
    load_parsed(&state, mailblast_contacts::parse_manual(&req.content)).await
}

async fn load_parsed(
    state: &AppState,
    parsed: mailblast_core::error::Result<Vec<mailblast_core::types::Contact>>,
) -> Json<serde_json::Value> {
    let contacts = match parsed {
        Ok(contacts) => contacts,
        Err(e) => return failure(e),
    };
    match state.campaign.load_roster(contacts).await {
        Ok(count) => Json(serde_json::json!({"success": true, "count": count})),
        Err(e) => failure(e),
    }
}

/// GET /api/campaign — current snapshot view for polling.
pub async fn campaign_view(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.campaign.status().await {
        Ok(view) => Json(serde_json::json!({"success": true, "campaign": view})),
        Err(e) => failure(e),
    }
}

#[derive(Deserialize)]
pub struct StartRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default, rename = "templateId")]
    pub template_id: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub from: String,
}

/// POST /api/campaign/start — compose from a template or a custom body
/// and launch.
pub async fn campaign_start(
    State(state): State<Arc<AppState>>,
    Json(req): Json<StartRequest>,
) -> Json<serde_json::Value> {
    let template = req
        .template_id
        .as_deref()
        .and_then(mailblast_delivery::find_template);

    let body = match req.body.filter(|b| !b.trim().is_empty()) {
        Some(body) => body,
        None => match &template {
            Some(t) => t.body.to_string(),
            None => {
                return failure(MailblastError::InvalidInput(
                    "Provide a message body or pick a template".into(),
                ))
            }
        },
    };
    let subject = if req.subject.trim().is_empty() {
        match &template {
            Some(t) => t.subject.to_string(),
            None => state.config.sender.subject.clone(),
        }
    } else {
        req.subject
    };
    let from = if req.from.trim().is_empty() {
        state.config.sender.from.clone()
    } else {
        req.from
    };

    let compose = ComposeSpec {
        subject,
        body,
        from,
    };
    match state.campaign.start(compose).await {
        Ok(()) => Json(serde_json::json!({"success": true})),
        Err(e) => failure(e),
    }
}

/// POST /api/campaign/pause
pub async fn campaign_pause(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.campaign.pause().await {
        Ok(()) => Json(serde_json::json!({"success": true})),
        Err(e) => failure(e),
    }
}

/// POST /api/campaign/resume
pub async fn campaign_resume(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.campaign.resume().await {
        Ok(()) => Json(serde_json::json!({"success": true})),
        Err(e) => failure(e),
    }
}

/// POST /api/campaign/stop
pub async fn campaign_stop(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    match state.campaign.stop().await {
        Ok(()) => Json(serde_json::json!({"success": true})),
        Err(e) => failure(e),
    }
}

/// GET /api/templates — built-in starter templates.
pub async fn templates() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "success": true,
        "templates": mailblast_delivery::builtin_templates(),
    }))
}

/// POST /api/summary — AI paragraph over the current stats.
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    let view = match state.campaign.status().await {
        Ok(view) => view,
        Err(e) => return failure(e),
    };
    let client = LlmClient::from_config(&state.config.ai);
    match mailblast_ai::summarize_performance(&client, &view.stats).await {
        Ok(text) => Json(serde_json::json!({"success": true, "summary": text})),
        Err(e) => failure(e),
    }
}
