//! Question answering over the loaded syllabus text.
//!
//! This module provides the `Assistant` struct which combines the prompt
//! builder with a Gemini-compatible client to answer one question per call.

use std::sync::Arc;

use crate::gemini::{GeminiClientTrait, GeminiError};
use crate::prompt::build_prompt;

/// Builder for constructing `Assistant` instances.
///
/// # Examples
///
/// ```no_run
/// use std::sync::Arc;
/// use syllabo::assistant::AssistantBuilder;
/// use syllabo::gemini::GeminiClientBuilder;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GeminiClientBuilder::new().api_key("secret").build()?;
///
/// let assistant = AssistantBuilder::new()
///     .client(Arc::new(client))
///     .model("gemini-1.5-flash")
///     .build();
///
/// let answer = assistant.answer("week 1: letter sounds", "what is week 1?")?;
/// println!("{answer}");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct AssistantBuilder {
    client: Option<Arc<dyn GeminiClientTrait>>,
    model: Option<String>,
}

impl AssistantBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the answer-service client to use.
    pub fn client(mut self, client: Arc<dyn GeminiClientTrait>) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the model name passed to the client on every call.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Builds the `Assistant`.
    ///
    /// The model defaults to `gemini-1.5-flash` when not set.
    ///
    /// # Panics
    ///
    /// Panics if `client()` was not called.
    #[must_use]
    pub fn build(self) -> Assistant {
        Assistant {
            client: self.client.expect("client must be set via client() method"),
            model: self
                .model
                .unwrap_or_else(|| "gemini-1.5-flash".to_string()),
        }
    }
}

/// Answers questions about the syllabus using an LLM.
pub struct Assistant {
    client: Arc<dyn GeminiClientTrait>,
    model: String,
}

impl Assistant {
    /// Creates a new `Assistant` with the specified client and model.
    ///
    /// Prefer `AssistantBuilder` for more ergonomic construction.
    #[must_use]
    pub fn new(client: Arc<dyn GeminiClientTrait>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Returns the model name used for generation.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Answers `question` using `document_text` as the only source.
    ///
    /// Builds the restrictive prompt and makes one blocking call to the
    /// answer service.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError` if the service call fails. An empty response
    /// envelope is not an error; it comes back as the no-answer sentinel.
    pub fn answer(&self, document_text: &str, question: &str) -> Result<String, GeminiError> {
        let prompt = build_prompt(document_text, question);
        self.client.generate(&self.model, &prompt)
    }
}
