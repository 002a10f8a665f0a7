//! Fake provider backends for testing
//!
//! Scripted responses per model plus call recording, so orchestration and
//! handler flows can be verified without network access.

use crate::gemini::{GenerativeBackend, ModelError, ModelInfo, GENERATE_CONTENT};
use crate::search::{SearchBackend, SearchError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Generative backend with a fixed reply per model name.
///
/// Models without a scripted reply fail with a 404, the same way an unknown
/// model name fails upstream.
pub struct FakeGenerativeBackend {
    replies: HashMap<String, Result<String, ModelError>>,
    models: Result<Vec<ModelInfo>, ModelError>,
    calls: Mutex<Vec<(String, String)>>,
    list_calls: Mutex<usize>,
}

impl FakeGenerativeBackend {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            models: Ok(vec![]),
            calls: Mutex::new(vec![]),
            list_calls: Mutex::new(0),
        }
    }

    /// Script a successful text reply for `model`
    pub fn reply(mut self, model: &str, text: &str) -> Self {
        self.replies.insert(model.to_string(), Ok(text.to_string()));
        self
    }

    /// Script a failure for `model`
    pub fn fail(mut self, model: &str, error: ModelError) -> Self {
        self.replies.insert(model.to_string(), Err(error));
        self
    }

    /// Script the model listing
    pub fn with_models(mut self, models: Result<Vec<ModelInfo>, ModelError>) -> Self {
        self.models = models;
        self
    }

    /// Model names passed to `generate_text`, in call order
    pub fn attempted_models(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    /// Prompts passed to `generate_text`, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn list_calls(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

impl Default for FakeGenerativeBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerativeBackend for FakeGenerativeBackend {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        self.replies.get(model).cloned().unwrap_or_else(|| {
            Err(ModelError::Http {
                status: 404,
                body: format!("models/{} is not found", model),
            })
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>, ModelError> {
        *self.list_calls.lock().unwrap() += 1;
        self.models.clone()
    }
}

/// Model listing entry that supports generation
pub fn generate_model(name: &str) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        supported_generation_methods: vec![GENERATE_CONTENT.to_string()],
    }
}

/// Search backend with a single scripted outcome
pub struct FakeSearchBackend {
    result: Result<Vec<String>, SearchError>,
    queries: Mutex<Vec<String>>,
}

impl FakeSearchBackend {
    pub fn new(result: Result<Vec<String>, SearchError>) -> Self {
        Self {
            result,
            queries: Mutex::new(vec![]),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchBackend for FakeSearchBackend {
    async fn related_searches(&self, query: &str) -> Result<Vec<String>, SearchError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.result.clone()
    }
}
