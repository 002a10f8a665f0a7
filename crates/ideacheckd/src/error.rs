//! Request-level errors and their HTTP mapping

use crate::gemini::ModelError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid JSON in request body")]
    InvalidJson,

    #[error("Invalid ideaDescription")]
    InvalidIdea,

    #[error("Missing GEMINI_API_KEY or SERPAPI_API_KEY")]
    MissingCredentials,

    #[error("{0}")]
    Upstream(#[from] ModelError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson | ApiError::InvalidIdea => StatusCode::BAD_REQUEST,
            ApiError::MissingCredentials | ApiError::Upstream(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
