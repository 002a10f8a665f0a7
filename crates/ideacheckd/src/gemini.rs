//! Gemini generative-language client
//!
//! Two operations are used: `models/{model}:generateContent` for a single
//! prompt and `models` for discovery. Both authenticate with the `key` query
//! parameter.

use crate::config::GeminiConfig;
use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info};

/// Generation method a model must advertise to be usable
pub const GENERATE_CONTENT: &str = "generateContent";

/// Model provider errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Gemini API error: {status} {body}")]
    Http { status: u16, body: String },

    #[error("Gemini returned no text")]
    EmptyResponse,

    #[error("Gemini request failed: {0}")]
    Transport(String),

    #[error("Gemini response is not valid JSON: {0}")]
    InvalidResponse(String),

    #[error("Gemini API: all model attempts failed for provided key")]
    Exhausted,
}

impl ModelError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ModelError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Request URLs carry the API key, so reqwest errors are rendered without them
pub(crate) fn describe(e: reqwest::Error) -> String {
    e.without_url().to_string()
}

impl From<reqwest::Error> for ModelError {
    fn from(e: reqwest::Error) -> Self {
        ModelError::Transport(describe(e))
    }
}

/// A model entry from the listing endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Full resource name, usually "models/<id>"
    pub name: String,
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports(&self, method: &str) -> bool {
        self.supported_generation_methods.iter().any(|m| m == method)
    }

    /// Name without the "models/" resource prefix
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// Generative backend abstraction so orchestration can be tested without network
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Run one generation request and return the first candidate's text
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ModelError>;

    /// List every model visible to the credential
    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError>;
}

/// HTTP client for the Gemini API
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    temperature: f64,
    max_output_tokens: u32,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, config: &GeminiConfig, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            temperature: config.temperature,
            max_output_tokens: config.max_output_tokens,
        }
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, GENERATE_CONTENT)
    }

    fn request_body(&self, prompt: &str) -> Value {
        json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "temperature": self.temperature,
                "maxOutputTokens": self.max_output_tokens
            }
        })
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        info!("[>]  GEMINI CALL [{}] ({} chars)", model, prompt.len());

        let response = self
            .http
            .post(self.generate_url(model))
            .query(&[("key", self.api_key.as_str())])
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("[-]  Gemini error {} for [{}]: {}", status, model, body);
            return Err(ModelError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(describe(e)))?;

        let text = candidate_text(&json).ok_or(ModelError::EmptyResponse)?;
        debug!("[<]  GEMINI RESPONSE [{}] ({} chars)", model, text.len());
        Ok(text.to_string())
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        let response = self
            .http
            .get(format!("{}/models", self.base_url))
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let json: Value = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(describe(e)))?;

        Ok(parse_model_list(&json))
    }
}

/// Text of the first part of the first candidate, if non-empty
fn candidate_text(json: &Value) -> Option<&str> {
    json.pointer("/candidates/0/content/parts/0/text")
        .and_then(|t| t.as_str())
        .filter(|t| !t.is_empty())
}

/// Accepts both `{"models": [...]}` and `{"data": [...]}`; entries without a
/// string name are skipped.
fn parse_model_list(json: &Value) -> Vec<ModelInfo> {
    let entries = json
        .get("models")
        .and_then(|m| m.as_array())
        .or_else(|| json.get("data").and_then(|d| d.as_array()));

    entries
        .map(|arr| {
            arr.iter()
                .filter_map(|m| {
                    let name = m.get("name").and_then(|n| n.as_str())?;
                    let methods = m
                        .get("supportedGenerationMethods")
                        .and_then(|x| x.as_array())
                        .map(|arr| {
                            arr.iter()
                                .filter_map(|x| x.as_str().map(|s| s.to_string()))
                                .collect()
                        })
                        .unwrap_or_default();
                    Some(ModelInfo {
                        name: name.to_string(),
                        supported_generation_methods: methods,
                    })
                })
                .collect()
        })
        .unwrap_or_default()
}
