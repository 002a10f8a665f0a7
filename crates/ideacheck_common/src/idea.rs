//! User-submitted idea text

use serde_json::Value;

/// Minimum idea length, counted in characters after trimming
pub const MIN_IDEA_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdeaError {
    #[error("ideaDescription is missing")]
    Missing,

    #[error("ideaDescription must be a string")]
    NotAString,

    #[error("ideaDescription must be at least 10 characters, got {0}")]
    TooShort(usize),
}

/// Validated idea description. Holds the text exactly as submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaInput(String);

impl IdeaInput {
    pub fn parse(text: &str) -> Result<Self, IdeaError> {
        let len = text.trim().chars().count();
        if len < MIN_IDEA_CHARS {
            return Err(IdeaError::TooShort(len));
        }
        Ok(Self(text.to_string()))
    }

    /// Validate the `ideaDescription` field of a request body
    pub fn from_field(field: Option<&Value>) -> Result<Self, IdeaError> {
        match field {
            None | Some(Value::Null) => Err(IdeaError::Missing),
            Some(Value::String(s)) => Self::parse(s),
            Some(_) => Err(IdeaError::NotAString),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
