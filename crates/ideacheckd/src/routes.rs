//! API routes for ideacheckd
//!
//! `POST /validate-idea` validates the body, resolves credentials, then either
//! builds a report or runs provider diagnostics when `debug` is true.

use crate::diagnostics;
use crate::error::ApiError;
use crate::fallback::ModelResolver;
use crate::gemini::ModelError;
use crate::search::{self, SearchBackend};
use crate::server::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ideacheck_common::{normalize, IdeaInput, ValidationReport};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Validation Routes
// ============================================================================

pub fn validate_routes() -> Router<AppStateArc> {
    Router::new().route("/validate-idea", post(validate_idea).options(preflight))
}

/// CORS headers are added by the middleware
async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn validate_idea(
    State(state): State<AppStateArc>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        ApiError::InvalidJson
    })?;

    let idea = IdeaInput::from_field(body.get("ideaDescription")).map_err(|e| {
        warn!("Rejected idea: {}", e);
        ApiError::InvalidIdea
    })?;
    let debug = body.get("debug").and_then(Value::as_bool) == Some(true);

    let creds = state.credentials.resolve().ok_or_else(|| {
        error!("Provider credentials are not configured");
        ApiError::MissingCredentials
    })?;
    let providers = state.providers(&creds);
    let resolver = providers.resolver(&state.config);

    if debug {
        info!("Running provider diagnostics");
        let report = diagnostics::run_diagnostics(
            providers.models.as_ref(),
            &resolver,
            providers.search.as_ref(),
        )
        .await;
        return Ok(Json(json!({ "diagnostics": report })).into_response());
    }

    let start = Instant::now();
    let report = build_report(&resolver, providers.search.as_ref(), idea.as_str()).await?;
    info!(
        "Report built in {}ms ({} related searches)",
        start.elapsed().as_millis(),
        report.seo_insights.related_searches.len()
    );

    Ok(Json(report).into_response())
}

/// Resolve the model output and related searches concurrently, then merge.
///
/// Search failures degrade to an empty list; model failures fail the report.
pub async fn build_report(
    resolver: &ModelResolver,
    search: &dyn SearchBackend,
    idea: &str,
) -> Result<ValidationReport, ModelError> {
    let (raw, related) = tokio::join!(resolver.resolve(idea), search::enrich(search, idea));
    Ok(normalize(&raw?, related))
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
    })
}
