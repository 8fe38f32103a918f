//! Request and response types for the chat completions API

use serde::{Deserialize, Serialize};

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// The role of the author ("system", "user", "assistant")
    pub role: String,

    /// Message text
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for a chat completion
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model name
    pub model: String,

    /// Conversation so far
    pub messages: Vec<ChatMessage>,
}

/// Response body of a chat completion
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Candidate completions
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A candidate completion
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// The generated message
    pub message: ResponseMessage,

    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The assistant message of a choice
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseMessage {
    /// Message text; absent for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if it has any
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Whether the first choice stopped at the token limit
    pub fn is_truncated(&self) -> bool {
        self.choices
            .first()
            .and_then(|choice| choice.finish_reason.as_deref())
            == Some("length")
    }
}
