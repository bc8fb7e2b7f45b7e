//! HTTP API for relationship extraction.
//!
//! - `POST /parse-text` runs the extractor over `{ "text": ... }`
//! - `GET /health` is a static liveness probe

use std::any::Any;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::Value;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::AppState;
use crate::config::ServerConfig;
use crate::error::ApiError;
use crate::graph::GraphResult;

// ─────────────────────────────────────────────────────────────────────────────
// DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Liveness probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    /// RFC 3339 UTC timestamp
    pub timestamp: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Router
// ─────────────────────────────────────────────────────────────────────────────

/// Build the API routes with middleware applied.
pub fn router(state: AppState, server: &ServerConfig) -> Router {
    let routes = Router::new()
        .route("/parse-text", post(parse_text))
        .route("/health", get(health))
        .with_state(state);

    with_middleware(routes, server)
}

/// Apply body limit, panic recovery, CORS and request tracing.
pub fn with_middleware(router: Router, server: &ServerConfig) -> Router {
    let router = router
        .layer(DefaultBodyLimit::max(server.body_limit_bytes))
        .layer(CatchPanicLayer::custom(panic_response));

    let router = if server.cors_enabled {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

/// Render a panic escaping a handler as a 500 with details.
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(name: "parse.panicked", details = %details, "Handler panicked");
    ApiError::Internal { details }.into_response()
}

// ─────────────────────────────────────────────────────────────────────────────
// Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// POST /parse-text - Extract a relationship graph from text.
async fn parse_text(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<GraphResult>, ApiError> {
    let body = match payload {
        Ok(Json(body)) => body,
        // A body that is not declared as JSON carries no `text` field
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(rejection) => return Err(map_rejection(rejection)),
    };
    let text = requested_text(&body)?;

    info!(
        name: "parse.request",
        extractor = state.extractor.name(),
        text_length = text.len(),
        "Parsing text"
    );
    tracing::debug!(text = %text, "Full request text");

    let result = state.extractor.extract(text);

    info!(
        name: "parse.completed",
        node_count = result.stats.node_count,
        edge_count = result.stats.edge_count,
        density = result.stats.density,
        "Parsing result"
    );

    Ok(Json(result))
}

/// Pull `text` out of a request body.
///
/// Missing, `null`, `false`, `0` and `""` all count as no text. Any other
/// non-string value is rejected.
pub fn requested_text(body: &Value) -> Result<&str, ApiError> {
    match body.get("text") {
        Some(Value::String(text)) if !text.is_empty() => Ok(text.as_str()),
        Some(value) if is_truthy(value) => Err(ApiError::TextNotString),
        _ => Err(ApiError::TextMissing),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn map_rejection(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonSyntaxError(e) => ApiError::MalformedBody {
            details: e.body_text(),
        },
        other => ApiError::Rejected {
            status: other.status(),
            details: other.body_text(),
        },
    }
}

/// GET /health - Liveness probe.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "parser",
        timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
    })
}
