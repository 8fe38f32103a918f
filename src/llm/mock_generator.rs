//! # Mock Text Generator for Testing
//!
//! Returns a canned reply (or a transient failure) and records every
//! `(system_prompt, user_prompt)` pair it receives.

use std::sync::{Arc, Mutex};

use crate::llm::TextGenerator;
use crate::llm::error::LlmError;

#[derive(Debug, Clone)]
pub struct MockGenerator {
    reply: Option<String>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockGenerator {
    /// A generator that always answers `reply`
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Arc::default(),
        }
    }

    /// A generator that always fails transiently
    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Arc::default(),
        }
    }

    /// Prompts received so far, shared across clones
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextGenerator for MockGenerator {
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));

        self.reply
            .clone()
            .ok_or_else(|| LlmError::Transient("connection reset".to_string()))
    }
}
