//! HTTP server for ideacheckd

use crate::config::Config;
use crate::cors;
use crate::credentials::{CredentialSource, Credentials};
use crate::fallback::ModelResolver;
use crate::gemini::{GeminiClient, GenerativeBackend};
use crate::routes;
use crate::search::{SearchBackend, SerpClient};
use anyhow::{Context, Result};
use axum::{middleware, Router};
use std::sync::Arc;
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Application state shared across handlers. Immutable after startup.
pub struct AppState {
    pub config: Config,
    pub credentials: CredentialSource,
    pub http: reqwest::Client,
    pub start_time: Instant,
}

/// Provider clients bound to one request's credentials
pub struct Providers {
    pub models: Arc<dyn GenerativeBackend>,
    pub search: Arc<dyn SearchBackend>,
}

impl Providers {
    pub fn resolver(&self, config: &Config) -> ModelResolver {
        ModelResolver::from_config(self.models.clone(), &config.gemini)
    }
}

impl AppState {
    pub fn new(config: Config, credentials: CredentialSource) -> Result<Self> {
        let http = config.http_client()?;
        Ok(Self {
            config,
            credentials,
            http,
            start_time: Instant::now(),
        })
    }

    pub fn providers(&self, creds: &Credentials) -> Providers {
        Providers {
            models: Arc::new(GeminiClient::new(
                self.http.clone(),
                &self.config.gemini,
                creds.gemini_key.clone(),
            )),
            search: Arc::new(SerpClient::new(
                self.http.clone(),
                &self.config.serp,
                creds.serp_key.clone(),
            )),
        }
    }
}

/// Build the router with all routes and layers
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(routes::validate_routes())
        .merge(routes::health_routes())
        .with_state(Arc::new(state))
        .layer(middleware::from_fn(cors::cors))
        .layer(TraceLayer::new_for_http())
}

/// Run the HTTP server
pub async fn run(state: AppState) -> Result<()> {
    let addr = state.config.server.listen.clone();
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("  Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
