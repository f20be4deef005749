/// Gemini HTTP client implementation.
///
/// This module provides `GeminiClient` for making synchronous HTTP requests
/// to the Gemini `generateContent` API, along with error types, builder
/// patterns for configuration, and the typed response envelope.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer returned when the response envelope contains no usable text.
pub const NO_ANSWER_SENTINEL: &str = "No answer generated.";

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Errors that can occur when interacting with the Gemini API.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// No API credential was configured. Fatal at startup.
    #[error("Missing API key: set the GEMINI_API_KEY environment variable")]
    MissingApiKey,

    /// Invalid base URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code (auth failures and quota exhaustion
    /// surface here as 401/403/429)
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}

/// Request body for the `generateContent` endpoint.
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

impl GenerateRequest {
    /// Wraps a single prompt string in the nested request shape.
    fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

/// Content wrapper for the request.
#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

/// A single part of the request content, the prompt text.
#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

/// Response envelope from the `generateContent` endpoint.
///
/// Every level is optional-by-default: the API may return no candidates,
/// a candidate with no content, or content with no parts, and none of
/// those shapes is treated as a deserialization failure.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// A single candidate completion.
#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

/// Content of a candidate.
#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

/// A single part of the candidate content.
#[derive(Debug, Default, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// Parsed shape of a response envelope.
#[derive(Debug, PartialEq, Eq)]
enum Envelope {
    /// The first candidate carried usable text.
    Answer(String),
    /// No candidates, no content, no parts, or only empty text.
    Empty,
}

/// Classifies a response envelope as an answer or an empty shell.
///
/// Walks candidates -> content -> parts -> text and treats any missing or
/// empty link in that chain as `Envelope::Empty`.
fn parse_envelope(response: &GenerateResponse) -> Envelope {
    let text = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .and_then(|content| content.parts.first())
        .map(|part| part.text.trim())
        .filter(|text| !text.is_empty());

    match text {
        Some(text) => Envelope::Answer(text.to_string()),
        None => Envelope::Empty,
    }
}

/// Unwraps the answer text from a response envelope.
///
/// Empty envelopes degrade to [`NO_ANSWER_SENTINEL`] rather than an error,
/// so a malformed-but-parseable response never aborts the interaction.
fn unwrap_answer(response: &GenerateResponse) -> String {
    match parse_envelope(response) {
        Envelope::Answer(text) => text,
        Envelope::Empty => NO_ANSWER_SENTINEL.to_string(),
    }
}

/// Builder for constructing `GeminiClient` instances.
///
/// # Examples
///
/// ```no_run
/// use syllabo::gemini::GeminiClientBuilder;
///
/// let client = GeminiClientBuilder::new()
///     .api_key("secret")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct GeminiClientBuilder {
    base_url: Option<String>,
    model: Option<String>,
    api_key: Option<String>,
}

impl GeminiClientBuilder {
    /// Creates a new `GeminiClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the Gemini API.
    ///
    /// Defaults to the hosted endpoint; overriding it is mainly useful for
    /// pointing tests at a local server.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the model name used for generation requests.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name (e.g., "gemini-1.5-flash")
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the API key used to authenticate requests.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Builds the `GeminiClient` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `api_key()` was not called, this method reads the
    /// `GEMINI_API_KEY` environment variable; if that is also absent,
    /// building fails with [`GeminiError::MissingApiKey`].
    ///
    /// If `model()` was not called, this method reads the `GEMINI_MODEL`
    /// environment variable, defaulting to `gemini-1.5-flash`.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeminiError)` when the credential is missing, the base
    /// URL does not parse, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<GeminiClient, GeminiError> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = if let Some(m) = self.model {
            m
        } else {
            std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
        };

        let api_key = match self.api_key {
            Some(key) => key,
            None => std::env::var("GEMINI_API_KEY").map_err(|_| GeminiError::MissingApiKey)?,
        };
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        // Validate URL
        reqwest::Url::parse(&base_url)
            .map_err(|e| GeminiError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // Blocking client with the transport's default timeouts; this
        // system never overrides them.
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(GeminiError::Network)?;

        Ok(GeminiClient {
            client,
            base_url,
            model,
            api_key,
        })
    }
}

/// Synchronous HTTP client for the Gemini `generateContent` API.
///
/// Makes one best-effort request per invocation: no retry, no backoff.
/// It should be constructed using `GeminiClientBuilder`.
pub struct GeminiClient {
    client: reqwest::blocking::Client,
    base_url: String,
    model: String,
    api_key: String,
}

/// Trait for answer-service client operations.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// for generating answers.
pub trait GeminiClientTrait: Send + Sync {
    /// Generates text for the given prompt.
    ///
    /// # Arguments
    ///
    /// * `model` - The model to use (e.g., "gemini-1.5-flash")
    /// * `prompt` - The prompt text to send
    ///
    /// # Returns
    ///
    /// Returns the generated text, or [`NO_ANSWER_SENTINEL`] when the
    /// service answered with an empty envelope, or an error if the request
    /// itself fails.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiError>;
}

impl GeminiClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name configured for this client.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generates text via the `generateContent` endpoint.
    ///
    /// This is the internal implementation called by the trait method.
    fn generate_internal(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );
        let request_body = GenerateRequest::from_prompt(prompt);

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(GeminiError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeminiError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(GeminiError::Network)?;
        let envelope: GenerateResponse =
            serde_json::from_str(&body).map_err(GeminiError::Serialization)?;

        Ok(unwrap_answer(&envelope))
    }
}

impl GeminiClientTrait for GeminiClient {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GeminiError> {
        self.generate_internal(model, prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::error::Error;

    fn parse_response(json: &str) -> GenerateResponse {
        serde_json::from_str(json).expect("envelope should deserialize")
    }

    // --- Envelope unwrapping ---

    #[test]
    fn unwrap_returns_text_of_first_part_of_first_candidate() {
        let response = parse_response(
            r#"{"candidates": [{"content": {"parts": [{"text": "week 1 covers letter sounds"}]}}]}"#,
        );

        assert_eq!(unwrap_answer(&response), "week 1 covers letter sounds");
    }

    #[test]
    fn unwrap_prefers_first_candidate_and_first_part() {
        let response = parse_response(
            r#"{"candidates": [
                {"content": {"parts": [{"text": "first"}, {"text": "second"}]}},
                {"content": {"parts": [{"text": "other candidate"}]}}
            ]}"#,
        );

        assert_eq!(unwrap_answer(&response), "first");
    }

    #[test]
    fn empty_candidate_list_yields_sentinel() {
        let response = parse_response(r#"{"candidates": []}"#);

        assert_eq!(unwrap_answer(&response), NO_ANSWER_SENTINEL);
    }

    #[test]
    fn missing_candidates_field_yields_sentinel() {
        let response = parse_response(r#"{}"#);

        assert_eq!(unwrap_answer(&response), NO_ANSWER_SENTINEL);
    }

    #[test]
    fn candidate_without_content_yields_sentinel() {
        let response = parse_response(r#"{"candidates": [{}]}"#);

        assert_eq!(unwrap_answer(&response), NO_ANSWER_SENTINEL);
    }

    #[test]
    fn content_without_parts_yields_sentinel() {
        let response = parse_response(r#"{"candidates": [{"content": {"parts": []}}]}"#);

        assert_eq!(unwrap_answer(&response), NO_ANSWER_SENTINEL);
    }

    #[test]
    fn whitespace_only_text_yields_sentinel() {
        let response =
            parse_response(r#"{"candidates": [{"content": {"parts": [{"text": "  \n "}]}}]}"#);

        assert_eq!(unwrap_answer(&response), NO_ANSWER_SENTINEL);
    }

    #[test]
    fn parse_envelope_distinguishes_answer_from_empty() {
        let full = parse_response(r#"{"candidates": [{"content": {"parts": [{"text": "hi"}]}}]}"#);
        let empty = parse_response(r#"{"candidates": []}"#);

        assert_eq!(parse_envelope(&full), Envelope::Answer("hi".to_string()));
        assert_eq!(parse_envelope(&empty), Envelope::Empty);
    }

    // --- Request shape ---

    #[test]
    fn request_serializes_to_nested_contents_parts() {
        let request = GenerateRequest::from_prompt("what is week 5?");
        let json = serde_json::to_value(&request).expect("request should serialize");

        assert_eq!(json["contents"][0]["parts"][0]["text"], "what is week 5?");
    }

    // --- Error variants ---

    #[test]
    fn missing_api_key_error_names_the_env_var() {
        let message = format!("{}", GeminiError::MissingApiKey);
        assert!(message.contains("GEMINI_API_KEY"));
    }

    #[test]
    fn http_error_variant_with_status_code() {
        let error = GeminiError::Http { status: 429 };

        let message = format!("{}", error);
        assert!(message.contains("HTTP error"));
        assert!(message.contains("429"));
    }

    #[test]
    fn network_error_variant_creation_and_display() {
        let client = reqwest::blocking::Client::new();
        let reqwest_error = client.get("not-a-valid-url").build().unwrap_err();
        let error = GeminiError::Network(reqwest_error);

        let message = format!("{}", error);
        assert!(message.contains("Network error"));
    }

    #[test]
    fn serialization_error_variant_wraps_serde_errors() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = GeminiError::Serialization(json_error);

        let message = format!("{}", error);
        assert!(message.contains("Serialization error"));
        assert!(error.source().is_some());
    }

    // --- Builder configuration ---

    #[test]
    #[serial]
    fn build_fails_without_api_key() {
        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }

        let result = GeminiClientBuilder::new().build();
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }

    #[test]
    #[serial]
    fn build_rejects_blank_api_key() {
        let result = GeminiClientBuilder::new().api_key("   ").build();
        assert!(matches!(result, Err(GeminiError::MissingApiKey)));
    }

    #[test]
    #[serial]
    fn build_reads_api_key_environment_variable_if_set() {
        unsafe {
            std::env::set_var("GEMINI_API_KEY", "env-secret");
        }

        let client = GeminiClientBuilder::new().build();
        assert!(client.is_ok());

        unsafe {
            std::env::remove_var("GEMINI_API_KEY");
        }
    }

    #[test]
    #[serial]
    fn build_uses_default_model_when_env_not_set() {
        unsafe {
            std::env::remove_var("GEMINI_MODEL");
        }

        let client = GeminiClientBuilder::new()
            .api_key("secret")
            .build()
            .expect("client should build");
        assert_eq!(client.model(), "gemini-1.5-flash");
    }

    #[test]
    #[serial]
    fn build_reads_model_environment_variable_if_set() {
        unsafe {
            std::env::set_var("GEMINI_MODEL", "gemini-1.5-pro");
        }

        let client = GeminiClientBuilder::new()
            .api_key("secret")
            .build()
            .expect("client should build");
        assert_eq!(client.model(), "gemini-1.5-pro");

        unsafe {
            std::env::remove_var("GEMINI_MODEL");
        }
    }

    #[test]
    #[serial]
    fn builder_model_takes_precedence_over_env_var() {
        unsafe {
            std::env::set_var("GEMINI_MODEL", "env-model");
        }

        let client = GeminiClientBuilder::new()
            .api_key("secret")
            .model("builder-model")
            .build()
            .expect("client should build");
        assert_eq!(client.model(), "builder-model");

        unsafe {
            std::env::remove_var("GEMINI_MODEL");
        }
    }

    #[test]
    #[serial]
    fn build_uses_hosted_endpoint_by_default() {
        let client = GeminiClientBuilder::new()
            .api_key("secret")
            .build()
            .expect("client should build");
        assert_eq!(client.base_url(), "https://generativelanguage.googleapis.com");
    }

    #[test]
    #[serial]
    fn build_returns_error_if_invalid_url_provided() {
        let result = GeminiClientBuilder::new()
            .api_key("secret")
            .base_url("not-a-valid-url")
            .build();

        assert!(matches!(result, Err(GeminiError::InvalidUrl(_))));
    }

    // --- Trait seam ---

    #[test]
    fn trait_can_be_implemented_by_mock_struct() {
        struct MockClient {
            response: String,
        }

        impl GeminiClientTrait for MockClient {
            fn generate(&self, _model: &str, _prompt: &str) -> Result<String, GeminiError> {
                Ok(self.response.clone())
            }
        }

        let mock = MockClient {
            response: "test response".to_string(),
        };
        let result = mock.generate("test-model", "test prompt");
        assert_eq!(result.unwrap(), "test response");
    }
}
