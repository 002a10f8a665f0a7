//! Model fallback orchestration
//!
//! Which models a key can call changes over time, so a single configured
//! model name is not enough. The resolver walks a small state machine:
//!
//! ```text
//! Start -> Candidate(0) -> Candidate(1) -> ... -> Discovery -> Failed
//!              |                                     |
//!              +--- rate limited / unavailable ------+--> Failed
//! ```
//!
//! Invariants:
//! - At most `candidates.len() + 1` generation attempts per resolve
//! - Rate limiting and service outages stop immediately, no discovery
//! - The surfaced error is the last one observed

use crate::config::GeminiConfig;
use crate::gemini::{GenerativeBackend, ModelError, GENERATE_CONTENT};
use crate::invoker;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Classification of a failed generation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    Unsupported,
    InvalidArgument,
    RateLimited,
    Unavailable,
    Other,
}

/// What the resolver does after a failed static candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackAction {
    /// Try the next static candidate
    Continue,
    /// Give up without further attempts
    Stop,
    /// Static list exhausted; ask the API which models exist
    Discover,
}

/// Classify a provider error.
///
/// Status codes decide first. Message matching is best effort and only
/// consulted when the status is not one of the known codes.
pub fn classify(err: &ModelError) -> FailureKind {
    let message = match err {
        ModelError::Http { status, body } => {
            match *status {
                429 => return FailureKind::RateLimited,
                503 => return FailureKind::Unavailable,
                404 => return FailureKind::NotFound,
                400 if is_unsupported(body) => return FailureKind::Unsupported,
                400 => return FailureKind::InvalidArgument,
                _ => {}
            }
            body.clone()
        }
        other => other.to_string(),
    };

    if message.contains("NOT_FOUND") || message.contains("not found") {
        FailureKind::NotFound
    } else if is_unsupported(&message) {
        FailureKind::Unsupported
    } else if message.contains("INVALID_ARGUMENT") {
        FailureKind::InvalidArgument
    } else if message.contains("RESOURCE_EXHAUSTED") {
        FailureKind::RateLimited
    } else if message.contains("UNAVAILABLE") {
        FailureKind::Unavailable
    } else {
        FailureKind::Other
    }
}

fn is_unsupported(message: &str) -> bool {
    message.contains("is not supported for generateContent")
}

/// Decide the next step after a static candidate failed
pub fn next_action(kind: FailureKind, has_more_candidates: bool) -> FallbackAction {
    match kind {
        FailureKind::RateLimited | FailureKind::Unavailable => FallbackAction::Stop,
        _ if has_more_candidates => FallbackAction::Continue,
        _ => FallbackAction::Discover,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Candidate(usize),
    Discovery,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttemptOutcome {
    Succeeded,
    Failed(FailureKind),
}

/// One (model, outcome) pair; lives only for a single resolve
#[derive(Debug, Clone)]
struct ModelAttempt {
    model: String,
    outcome: AttemptOutcome,
}

/// Resolves an idea to raw report JSON using whichever model works
pub struct ModelResolver {
    backend: Arc<dyn GenerativeBackend>,
    candidates: Vec<String>,
    preferred_families: Vec<String>,
}

impl ModelResolver {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        candidates: Vec<String>,
        preferred_families: Vec<String>,
    ) -> Self {
        Self {
            backend,
            candidates,
            preferred_families,
        }
    }

    pub fn from_config(backend: Arc<dyn GenerativeBackend>, config: &GeminiConfig) -> Self {
        Self::new(
            backend,
            config.candidate_models.clone(),
            config.preferred_families.clone(),
        )
    }

    pub async fn resolve(&self, idea: &str) -> Result<Value, ModelError> {
        let mut attempts: Vec<ModelAttempt> = Vec::new();
        let mut last_error: Option<ModelError> = None;
        let mut state = State::Start;

        loop {
            state = match state {
                State::Start if self.candidates.is_empty() => State::Discovery,
                State::Start => State::Candidate(0),

                State::Candidate(i) => {
                    let model = &self.candidates[i];
                    match self.attempt(model, idea, &mut attempts).await {
                        Ok(raw) => return Ok(raw),
                        Err(e) => {
                            let kind = classify(&e);
                            last_error = Some(e);
                            match next_action(kind, i + 1 < self.candidates.len()) {
                                FallbackAction::Continue => State::Candidate(i + 1),
                                FallbackAction::Discover => State::Discovery,
                                FallbackAction::Stop => {
                                    warn!("Model [{}] {:?}, not retrying", model, kind);
                                    State::Failed
                                }
                            }
                        }
                    }
                }

                State::Discovery => match self.discover(&attempts).await {
                    Some(model) => match self.attempt(&model, idea, &mut attempts).await {
                        Ok(raw) => return Ok(raw),
                        Err(e) => {
                            last_error = Some(e);
                            State::Failed
                        }
                    },
                    None => State::Failed,
                },

                State::Failed => {
                    let err = last_error.unwrap_or(ModelError::Exhausted);
                    let tried: Vec<String> = attempts
                        .iter()
                        .map(|a| format!("{}={:?}", a.model, a.outcome))
                        .collect();
                    error!("All model attempts failed [{}]: {}", tried.join(", "), err);
                    return Err(err);
                }
            };
        }
    }

    async fn attempt(
        &self,
        model: &str,
        idea: &str,
        attempts: &mut Vec<ModelAttempt>,
    ) -> Result<Value, ModelError> {
        info!("Trying model [{}]", model);
        let result = invoker::invoke(self.backend.as_ref(), model, idea).await;

        let outcome = match &result {
            Ok(_) => AttemptOutcome::Succeeded,
            Err(e) => {
                let kind = classify(e);
                warn!("Model [{}] failed ({:?}): {}", model, kind, e);
                AttemptOutcome::Failed(kind)
            }
        };
        attempts.push(ModelAttempt {
            model: model.to_string(),
            outcome,
        });

        result
    }

    /// Pick a listed model that supports generation and belongs to a preferred
    /// family, skipping names already attempted. Listing failures yield `None`.
    async fn discover(&self, attempts: &[ModelAttempt]) -> Option<String> {
        let models = match self.backend.list_models().await {
            Ok(models) => models,
            Err(e) => {
                warn!("Model discovery failed: {}", e);
                return None;
            }
        };

        let usable: Vec<_> = models
            .iter()
            .filter(|m| m.supports(GENERATE_CONTENT))
            .filter(|m| !attempts.iter().any(|a| a.model == m.id()))
            .collect();

        let found = self.preferred_families.iter().find_map(|family| {
            usable
                .iter()
                .find(|m| m.name.contains(family.as_str()))
                .map(|m| m.id().to_string())
        });

        match &found {
            Some(model) => info!("Discovered model [{}]", model),
            None => warn!(
                "Discovery found no usable model among {} listed",
                models.len()
            ),
        }
        found
    }
}
