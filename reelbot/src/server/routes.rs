//! HTTP boundary: webhook intake, webhook registration, health, root. Every core error is turned
//! into a definite status code or a JSON body with an explicit discriminant.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use reelbot_core::WebhookRegistration;
use reelbot_runtime::{HealthStatus, WEBHOOK_PATH};
use reelbot_telegram::decode_update;
use serde::Serialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info, warn};

use super::state::AppState;

pub const SET_WEBHOOK_PATH: &str = "/api/set_webhook";
pub const HEALTH_PATH: &str = "/api/health";
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route(WEBHOOK_PATH, post(webhook))
        .route(SET_WEBHOOK_PATH, get(set_webhook))
        .route(HEALTH_PATH, get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn validate_secret_token(headers: &HeaderMap, expected: Option<&str>) -> Result<(), StatusCode> {
    let Some(expected) = expected else {
        return Ok(());
    };
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if provided == Some(expected) {
        Ok(())
    } else {
        warn!("Webhook request rejected: secret token mismatch");
        Err(StatusCode::UNAUTHORIZED)
    }
}

async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    if let Err(status) = validate_secret_token(&headers, state.webhook_secret()) {
        return status.into_response();
    }

    let update = match decode_update(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, "Malformed webhook body");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };
    let update_id = update.update_id();
    info!(update_id, kind = ?update.kind(), "Webhook received update");

    if let Some(dedup) = &state.dedup {
        if dedup.is_duplicate(update_id).await {
            debug!(update_id, "Skipping duplicate update");
            return (StatusCode::OK, "OK").into_response();
        }
    }

    match state.manager.dispatch(&update).await {
        Ok(outcome) => {
            debug!(update_id, handler = %outcome.handler, sends = outcome.sends, "Update processed");
            (StatusCode::OK, "OK").into_response()
        }
        Err(e) => {
            error!(update_id, error = %e, "Webhook dispatch failed");
            if let Some(dedup) = &state.dedup {
                dedup.forget(update_id).await;
            }
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct SetWebhookResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    webhook_info: Option<WebhookRegistration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn set_webhook(State(state): State<AppState>) -> Json<SetWebhookResponse> {
    let result = state
        .manager
        .register_webhook(state.webhook_base_url.as_deref(), &state.webhook_options)
        .await;
    Json(match result {
        Ok(setup) => SetWebhookResponse {
            success: true,
            webhook_url: Some(setup.webhook_url),
            webhook_info: Some(setup.webhook_info),
            error: None,
        },
        Err(e) => {
            error!(error = %e, "Webhook registration failed");
            SetWebhookResponse {
                success: false,
                webhook_url: None,
                webhook_info: None,
                error: Some(e.to_string()),
            }
        }
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(state.manager.health_check().await)
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Instagram reel bot is running. Use /api/set_webhook to register the webhook.",
        "endpoints": {
            "webhook": WEBHOOK_PATH,
            "set_webhook": SET_WEBHOOK_PATH,
            "health": HEALTH_PATH,
        }
    }))
}
