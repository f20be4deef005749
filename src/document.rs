//! Lesson-plan document loading and text normalization.
//!
//! Extracts plain text from the syllabus PDF page by page and normalizes
//! it into the single lowercase string the prompt builder works with.

use std::path::{Path, PathBuf};

use lopdf::Document;
use thiserror::Error;

/// Errors that can occur while extracting text from the document.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document could not be opened or parsed (missing file, corrupt PDF).
    #[error("Failed to read document {}: {source}", path.display())]
    Open {
        /// Path of the document that failed to load.
        path: PathBuf,
        /// The underlying parser error.
        #[source]
        source: lopdf::Error,
    },
}

/// Extracts the full text of the document at `path`.
///
/// Pages are visited in page-number order. Pages that yield no extractable
/// text are skipped; the remaining per-page texts are joined with a blank
/// line and the combined result is passed through [`normalize_text`].
///
/// # Errors
///
/// Returns [`ExtractionError::Open`] if the file is missing or cannot be
/// parsed as a PDF. Extraction failures never propagate as panics.
pub fn extract_document_text(path: &Path) -> Result<String, ExtractionError> {
    let document = Document::load(path).map_err(|source| ExtractionError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut pages = Vec::new();
    for page_number in document.get_pages().keys() {
        // A page with no decodable text is skipped, not fatal.
        let Ok(page_text) = document.extract_text(&[*page_number]) else {
            continue;
        };
        if page_text.trim().is_empty() {
            continue;
        }
        pages.push(page_text);
    }

    Ok(normalize_text(&pages.join("\n\n")))
}

/// Normalizes extracted text for prompting.
///
/// Collapses every whitespace run to a single space, trims both ends, and
/// lower-cases the result.
///
/// # Examples
///
/// ```
/// use syllabo::document::normalize_text;
///
/// assert_eq!(normalize_text("  Week   1:\n\nPhonics  "), "week 1: phonics");
/// assert_eq!(normalize_text("\t\n "), "");
/// ```
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
