//! HTTP request handlers for the blog graph API

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

use super::schema::{RequestSnapshot, ROOT_FIELDS};
use crate::core::AppState;
use crate::storage::StoreCounts;

/// System health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current system status
    pub status: String,
    /// System uptime duration
    pub uptime: String,
    /// Crate version
    pub version: String,
}

/// System information response
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Service name
    pub name: String,
    /// Crate version
    pub version: String,
    /// Root fields of the GraphQL schema
    pub operations: Vec<&'static str>,
    /// Current collection sizes
    pub counts: StoreCounts,
}

/// HTTP status for a failed field, keyed by the error's `kind` extension
pub fn status_for_kind(kind: &str) -> StatusCode {
    match kind {
        "EmailTaken" => StatusCode::CONFLICT,
        "UserNotFound" | "PostNotFound" | "NotFound" => StatusCode::NOT_FOUND,
        "PostNotPublished" => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// HTTP status for an executed document. Errors raised by the engine carry
/// a `kind`; parse and validation errors do not and map to 400.
pub fn response_status(response: &async_graphql::Response) -> StatusCode {
    let Some(first) = response.errors.first() else {
        return StatusCode::OK;
    };

    match first.extensions.as_ref().and_then(|extensions| extensions.get("kind")) {
        Some(async_graphql::Value::String(kind)) => status_for_kind(kind),
        _ => StatusCode::BAD_REQUEST,
    }
}

/// Execute a GraphQL document
pub async fn graphql(
    State(state): State<Arc<AppState>>,
    request: GraphQLRequest,
) -> (StatusCode, Json<async_graphql::Response>) {
    let request = request
        .into_inner()
        .data(RequestSnapshot(state.engine.snapshot()));
    let response = state.schema.execute(request).await;

    let status = response_status(&response);
    if status.is_server_error() {
        error!("Request failed: {:?}", response.errors);
    }
    (status, Json(response))
}

/// GraphiQL page for exploring the schema
pub async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// Root handler listing the available endpoints
pub async fn root_handler() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /graphql": "Execute a GraphQL query or mutation",
            "GET /graphql": "GraphiQL explorer",
            "GET /health": "Health check",
            "GET /info": "Service information and collection sizes",
            "GET /metrics": "Prometheus metrics",
        }
    }))
}

/// Health check
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime: format_uptime(state.started_at.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Service information
pub async fn system_info(State(state): State<Arc<AppState>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        operations: ROOT_FIELDS.to_vec(),
        counts: state.engine.counts(),
    })
}

/// Prometheus text exposition
pub async fn metrics(State(state): State<Arc<AppState>>) -> Response {
    if !state.config.metrics.enable_prometheus {
        return StatusCode::NOT_FOUND.into_response();
    }

    match state.engine.metrics().encode_text() {
        Ok(body) => ([(CONTENT_TYPE, "text/plain; version=0.0.4")], body).into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn format_uptime(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}
