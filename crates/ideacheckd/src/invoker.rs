//! Model invoker: one generation request, turned into raw report JSON.

use crate::gemini::{GenerativeBackend, ModelError};
use ideacheck_common::{extract_json, prompts};
use serde_json::Value;

/// Ask `model` to analyze `idea`.
///
/// Fails only when the call itself fails or yields no text. Any text that
/// comes back is turned into an object by the extractor, faithful or not.
pub async fn invoke(
    backend: &dyn GenerativeBackend,
    model: &str,
    idea: &str,
) -> Result<Value, ModelError> {
    let prompt = prompts::analysis_prompt(idea);
    let text = backend.generate_text(model, &prompt).await?;
    Ok(extract_json(&text))
}
