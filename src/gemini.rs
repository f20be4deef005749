/// Gemini HTTP client module.
///
/// This module provides a blocking HTTP client for the Gemini
/// `generateContent` API, including error types, builder-based
/// configuration, and defensive response unwrapping.
mod client;

pub use client::{
    GeminiClient, GeminiClientBuilder, GeminiClientTrait, GeminiError, NO_ANSWER_SENTINEL,
};
