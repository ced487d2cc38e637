//! Transcript source: the backend's per-turn response document and the chat
//! messages built from it.
//!
//! A successful turn arrives as `{"output": "...", "call_responses": [...]}`,
//! a failed one as `{"error": "..."}`. Failures are surfaced in the
//! transcript as an assistant message prefixed with `Error: `.

use serde::{Deserialize, Serialize};

/// Error type for decoding a backend response document.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("Invalid response document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Backend error: {0}")]
    Backend(String),
}

/// One completed assistant turn as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub output: String,
    /// Raw call/result annotations produced during the turn, in order.
    #[serde(default)]
    pub call_responses: Vec<String>,
}

/// Decode a backend response body.
///
/// # Errors
///
/// Returns [`TranscriptError::Json`] for malformed documents and
/// [`TranscriptError::Backend`] when the backend reported an error.
pub fn decode_response(body: &[u8]) -> Result<MessageResponse, TranscriptError> {
    let document: serde_json::Value = serde_json::from_slice(body)?;
    if let Some(error) = document.get("error").and_then(serde_json::Value::as_str) {
        return Err(TranscriptError::Backend(error.to_string()));
    }
    Ok(serde_json::from_value(document)?)
}

/// Speaker of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One rendered message of the conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub call_responses: Vec<String>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            call_responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn assistant_from_response(response: MessageResponse) -> Self {
        Self {
            role: Role::Assistant,
            content: response.output,
            call_responses: response.call_responses,
        }
    }

    /// Assistant message standing in for a failed turn.
    #[must_use]
    pub fn error(message: impl std::fmt::Display) -> Self {
        Self {
            role: Role::Assistant,
            content: format!("Error: {message}"),
            call_responses: Vec::new(),
        }
    }

    /// Message for a decoded response, or the error message for a failed one.
    #[must_use]
    pub fn from_result(result: Result<MessageResponse, TranscriptError>) -> Self {
        match result {
            Ok(response) => Self::assistant_from_response(response),
            Err(TranscriptError::Backend(message)) => Self::error(message),
            Err(err) => Self::error(err),
        }
    }
}
