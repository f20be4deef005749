//! Per-session state for the assistant.
//!
//! An explicit `Session` object is passed to handlers instead of ambient
//! globals. It owns the cached document text (loaded at most once), the
//! most recent rating selection, and the question most recently answered.

use std::path::{Path, PathBuf};

use crate::document::{self, ExtractionError};
use crate::feedback::Rating;

/// State for one interactive session.
///
/// Created when the session starts and cleared when it ends; nothing here
/// is shared between sessions.
#[derive(Debug, Clone)]
pub struct Session {
    document_path: PathBuf,
    document_text: Option<String>,
    last_rating: Option<Rating>,
    last_question: Option<String>,
}

impl Session {
    /// Creates a session for the document at `document_path`.
    ///
    /// The document is not read until the first call to
    /// [`document_text`](Self::document_text).
    pub fn new(document_path: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            document_text: None,
            last_rating: None,
            last_question: None,
        }
    }

    /// Returns the path of the session document.
    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    /// Returns the normalized document text, extracting it on first access.
    ///
    /// The extracted text is cached for the lifetime of the session;
    /// repeated calls never re-run extraction.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractionError`] if the document cannot be read.
    pub fn document_text(&mut self) -> Result<&str, ExtractionError> {
        self.document_text_with(document::extract_document_text)
    }

    /// Same as [`document_text`](Self::document_text) with an injectable
    /// loader.
    ///
    /// Separated so tests can observe how often extraction actually runs.
    ///
    /// # Errors
    ///
    /// Returns whatever error `load` produces on the first (and only) load.
    pub fn document_text_with<F>(&mut self, load: F) -> Result<&str, ExtractionError>
    where
        F: FnOnce(&Path) -> Result<String, ExtractionError>,
    {
        if self.document_text.is_none() {
            self.document_text = Some(load(&self.document_path)?);
        }
        Ok(self.document_text.as_deref().unwrap_or_default())
    }

    /// Returns `true` once the document text has been loaded and cached.
    pub fn is_document_loaded(&self) -> bool {
        self.document_text.is_some()
    }

    /// Returns the most recent rating selection, if any.
    pub fn last_rating(&self) -> Option<Rating> {
        self.last_rating
    }

    /// Records the most recent rating selection.
    pub fn set_last_rating(&mut self, rating: Rating) {
        self.last_rating = Some(rating);
    }

    /// Returns the question most recently answered, if any.
    pub fn last_question(&self) -> Option<&str> {
        self.last_question.as_deref()
    }

    /// Records the question that was just answered.
    pub fn set_last_question(&mut self, question: impl Into<String>) {
        self.last_question = Some(question.into());
    }

    /// Drops all cached session state.
    pub fn clear(&mut self) {
        self.document_text = None;
        self.last_rating = None;
        self.last_question = None;
    }
}
