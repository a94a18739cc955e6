//! HTTP Endpoints
//!
//! Dialogflow fulfilment webhook plus health, readiness and metrics.

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use uuid::Uuid;

use tourist_webhook_core::{ReplyPayload, WebhookRequest, WebhookResponse};

use crate::metrics::{metrics_handler, record_request};
use crate::state::AppState;
use crate::ServerError;

/// Path of the fulfilment webhook
pub const WEBHOOK_PATH: &str = "/webhook";
/// Same handler under the name the assistant was first deployed with
pub const LEGACY_WEBHOOK_PATH: &str = "/virtualAssistantLatacungaWebhook";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let (cors_layer, request_timeout) = {
        let config = state.get_config();
        (
            build_cors_layer(&config.server.cors_origins, config.server.cors_enabled),
            Duration::from_secs(config.server.request_timeout_seconds),
        )
    };

    Router::new()
        .route(WEBHOOK_PATH, post(webhook))
        .route(LEGACY_WEBHOOK_PATH, post(webhook))
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_handler))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If cors_origins is empty, defaults to localhost:3000
/// - Otherwise, uses the configured origins
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to localhost:3000");
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static("http://localhost:3000"))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Fulfilment webhook
///
/// Bodies that are not a fulfilment request are rejected with 400 before dispatch.
async fn webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, ServerError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::warn!(error = %rejection.body_text(), "Rejected webhook body");
        ServerError::InvalidRequest(rejection.body_text())
    })?;

    let intent = request.intent();
    let span = tracing::info_span!(
        "webhook",
        request_id = %Uuid::new_v4(),
        action = %intent,
    );

    async move {
        record_request(&intent);
        let reply = state.dispatcher.dispatch(&request).await;
        tracing::debug!(message = %reply.message, has_data = reply.data.is_some(), "Replying");
        Ok::<_, ServerError>(emit(reply))
    }
    .instrument(span)
    .await
}

/// Response emitter: the one body written per request, `displayText == speech`
pub fn emit(reply: ReplyPayload) -> Json<WebhookResponse> {
    Json(WebhookResponse::from(reply))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let environment = state.get_config().environment;
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": environment,
        "store": state.store.backend_name(),
    }))
}

/// Readiness: the store answers its health check within the query deadline
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let deadline = state.query_timeout();

    let (ready, store_status) =
        match tokio::time::timeout(deadline, state.store.health_check()).await {
            Ok(Ok(())) => (true, "ok".to_string()),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Store health check failed");
                (false, format!("error: {}", e))
            },
            Err(_) => {
                tracing::warn!(deadline_ms = deadline.as_millis() as u64, "Store health check timed out");
                (false, "timeout".to_string())
            },
        };

    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "checks": {
                "store": {
                    "backend": state.store.backend_name(),
                    "status": store_status,
                }
            }
        })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tourist_webhook_config::Settings;
    use tourist_webhook_persistence::InMemoryRecordStore;

    #[test]
    fn test_router_creation() {
        let state = AppState::new(Settings::default(), Arc::new(InMemoryRecordStore::new()));
        let _ = create_router(state);
    }

    #[test]
    fn test_emit_mirrors_speech() {
        let Json(response) = emit(ReplyPayload::message_only("La acción no fue identificada"));
        assert_eq!(response.speech, response.display_text);
        assert!(response.data.is_none());
    }

    #[test]
    fn test_cors_layer_variants() {
        let _ = build_cors_layer(&[], false);
        let _ = build_cors_layer(&[], true);
        let _ = build_cors_layer(&["https://console.dialogflow.com".to_string()], true);
    }
}
