//! Shared path helpers for the document and the feedback files.
//!
//! These functions are reused across the CLI and TUI interfaces.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Document path used when neither the CLI flag nor the environment sets one.
pub const DEFAULT_DOCUMENT_PATH: &str = "lesson_plan.pdf";

/// File name for rating feedback rows.
pub const RATING_FEEDBACK_FILE: &str = "feedback.csv";

/// File name for free-text feedback rows.
pub const OPEN_FEEDBACK_FILE: &str = "open_feedback.csv";

/// Resolves the lesson-plan document path.
///
/// Precedence: explicit CLI value, then the `SYLLABO_DOCUMENT` environment
/// variable, then [`DEFAULT_DOCUMENT_PATH`] in the working directory.
pub fn resolve_document_path(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    std::env::var("SYLLABO_DOCUMENT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_DOCUMENT_PATH))
}

/// Gets the directory holding the feedback files.
///
/// Honors the `SYLLABO_DATA_DIR` override, otherwise returns
/// `{data_dir}/syllabo` where `data_dir` is:
/// - Linux: `~/.local/share`
/// - macOS: `~/Library/Application Support`
/// - Windows: `C:\Users\<user>\AppData\Roaming`
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn feedback_data_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("SYLLABO_DATA_DIR") {
        return Ok(PathBuf::from(dir));
    }

    let data_dir =
        dirs::data_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine data directory"))?;

    Ok(data_dir.join("syllabo"))
}

/// Path of the rating feedback table.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn rating_feedback_path() -> Result<PathBuf> {
    Ok(feedback_data_dir()?.join(RATING_FEEDBACK_FILE))
}

/// Path of the free-text feedback table.
///
/// # Errors
///
/// Returns an error if the data directory cannot be determined.
pub fn open_feedback_path() -> Result<PathBuf> {
    Ok(feedback_data_dir()?.join(OPEN_FEEDBACK_FILE))
}

/// Ensures the parent directory of a feedback file exists.
///
/// Creates the directory structure if it doesn't exist using `create_dir_all`.
///
/// # Errors
///
/// Returns an error if directory creation fails.
pub fn ensure_parent_directory(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}
