//! # Language Model Client
//!
//! Text generation through an OpenAI-compatible chat completions API.
//!
//! ## Key Components
//!
//! - `TextGenerator`: The capability the rest of the crate depends on
//! - `ChatClient` / `ChatModel`: HTTP implementation bound to a model
//! - `Assistant`: Topic-aware prompts for text, JSON and HTML output
//!
//! Calls are made once; there is no retry or rate limiting. Errors say whether
//! a failure was transient (`LlmError::Transient`) or the answer unusable
//! (`LlmError::InvalidResponse`).

mod assistant;
mod error;
mod http;
mod types;

#[cfg(test)]
pub(crate) mod mock_generator;

pub use assistant::{Assistant, DEFAULT_TOPIC, OutputFormat};
pub use error::LlmError;
pub use http::{API_KEY_ENV, BASE_URL_ENV, ChatClient, ChatModel, DEFAULT_BASE_URL};
pub use types::{ChatMessage, ChatRequest, ChatResponse, Choice, ResponseMessage};

use std::future::Future;

/// Generates a completion from a system prompt and a user prompt
pub trait TextGenerator {
    fn generate_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> impl Future<Output = Result<String, LlmError>> + Send;
}
