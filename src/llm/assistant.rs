//! Topic-aware prompting on top of a `TextGenerator`

use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::llm::TextGenerator;
use crate::llm::error::LlmError;

/// Topic used when none is given
pub const DEFAULT_TOPIC: &str = "everything";

/// Shape of the generated content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Html,
}

impl OutputFormat {
    /// Model used for this format unless overridden
    pub fn default_model(self) -> &'static str {
        match self {
            OutputFormat::Html => "gpt-4",
            OutputFormat::Text | OutputFormat::Json => "gpt-3.5-turbo",
        }
    }

    /// System prompt used for this format when the caller gives none
    pub fn default_system_prompt(self, topic: &str) -> String {
        match self {
            OutputFormat::Text => {
                format!("You are a helpful assistant that knows a lot about {}", topic)
            }
            OutputFormat::Json => format!(
                "You are a helpful assistant that knows a lot about {} and only responds with JSON",
                topic
            ),
            OutputFormat::Html => format!(
                "You are a helpful assistant that knows a lot about {} and only responds with HTML with only the HTML code. Nicely format with different header sizes and tables when necessary",
                topic
            ),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// Generates text, JSON or HTML about a topic
#[derive(Debug, Clone)]
pub struct Assistant<G> {
    generator: G,
    topic: String,
}

impl<G: TextGenerator> Assistant<G> {
    /// Create an assistant with the default topic
    pub fn new(generator: G) -> Self {
        Self::with_topic(generator, DEFAULT_TOPIC)
    }

    /// Create an assistant that knows about `topic`
    pub fn with_topic(generator: G, topic: impl Into<String>) -> Self {
        Self {
            generator,
            topic: topic.into(),
        }
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Generate content in `format`, using the format's default system prompt
    /// unless one is supplied
    #[instrument(skip(self, user_prompt, system_prompt), level = "debug", fields(topic = %self.topic))]
    pub async fn generate(
        &self,
        format: OutputFormat,
        user_prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, LlmError> {
        let system_prompt = system_prompt
            .map(str::to_string)
            .unwrap_or_else(|| format.default_system_prompt(&self.topic));

        debug!("Generating {} for prompt of length {}", format, user_prompt.len());
        self.generator.generate_text(&system_prompt, user_prompt).await
    }

    /// Generate plain text
    pub async fn generate_text(
        &self,
        user_prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, LlmError> {
        self.generate(OutputFormat::Text, user_prompt, system_prompt).await
    }

    /// Generate HTML
    pub async fn generate_html(
        &self,
        user_prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<String, LlmError> {
        self.generate(OutputFormat::Html, user_prompt, system_prompt).await
    }

    /// Generate JSON and parse it
    pub async fn generate_json(
        &self,
        user_prompt: &str,
        system_prompt: Option<&str>,
    ) -> Result<serde_json::Value, LlmError> {
        let text = self.generate(OutputFormat::Json, user_prompt, system_prompt).await?;
        serde_json::from_str(text.trim()).map_err(|e| {
            LlmError::InvalidResponse(format!("Model did not return valid JSON: {}", e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::mock_generator::MockGenerator;

    #[tokio::test]
    async fn test_default_system_prompts_include_topic() {
        let generator = MockGenerator::replying("ok");
        let assistant = Assistant::with_topic(generator.clone(), "Prefect");

        assistant.generate_text("What is a flow?", None).await.unwrap();
        assistant.generate_html("Explain tasks", None).await.unwrap();

        let calls = generator.calls();
        assert_eq!(
            calls[0],
            (
                "You are a helpful assistant that knows a lot about Prefect".to_string(),
                "What is a flow?".to_string()
            )
        );
        assert!(calls[1].0.contains("only responds with HTML"));
        assert!(calls[1].0.contains("Prefect"));
    }

    #[tokio::test]
    async fn test_explicit_system_prompt_wins() {
        let generator = MockGenerator::replying("ok");
        let assistant = Assistant::new(generator.clone());

        assistant
            .generate_text("hello", Some("Answer in French"))
            .await
            .unwrap();

        assert_eq!(generator.calls()[0].0, "Answer in French");
        assert_eq!(assistant.topic(), "everything");
    }

    #[tokio::test]
    async fn test_generate_json_parses_reply() {
        let generator = MockGenerator::replying("  {\"steps\": [1, 2]}\n");
        let assistant = Assistant::new(generator.clone());

        let value = assistant.generate_json("list steps", None).await.unwrap();
        assert_eq!(value, serde_json::json!({"steps": [1, 2]}));
        assert!(generator.calls()[0].0.ends_with("only responds with JSON"));
    }

    #[tokio::test]
    async fn test_generate_json_rejects_prose() {
        let assistant = Assistant::new(MockGenerator::replying("Sure! Here you go."));

        let result = assistant.generate_json("list steps", None).await;
        assert!(matches!(result, Err(LlmError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_generator_errors_propagate() {
        let assistant = Assistant::new(MockGenerator::failing());

        let result = assistant.generate_text("hi", None).await;
        assert!(matches!(result, Err(LlmError::Transient(_))));
    }

    #[test]
    fn test_output_format_parsing_and_models() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("html".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert!("pdf".parse::<OutputFormat>().is_err());

        assert_eq!(OutputFormat::Html.default_model(), "gpt-4");
        assert_eq!(OutputFormat::Text.default_model(), "gpt-3.5-turbo");
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }
}
