pub mod assistant;
pub mod document;
pub mod feedback;
pub mod gemini;
pub mod prompt;
pub mod session;
pub mod tui;
pub mod utils;

pub use assistant::{Assistant, AssistantBuilder};
pub use document::{ExtractionError, extract_document_text, normalize_text};
pub use feedback::{FeedbackStore, OpenRecord, Rating, RatingRecord, StorageError};
pub use gemini::{
    GeminiClient, GeminiClientBuilder, GeminiClientTrait, GeminiError, NO_ANSWER_SENTINEL,
};
pub use session::Session;
