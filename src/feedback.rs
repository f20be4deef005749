//! Feedback persistence to flat CSV tables.
//!
//! Two record shapes are appended to two independent files: a binary
//! helpfulness rating (with the question it rates) and free-text feedback.
//! Every append reads the whole table, adds one row, and rewrites the file,
//! so prior rows are always preserved verbatim and in order.

use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Row timestamp layout, kept as a plain string in the table.
const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Errors that can occur while persisting feedback.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The feedback file is open or locked by another process.
    #[error("Feedback file is locked by another process: {0}")]
    Locked(#[source] std::io::Error),

    /// The existing table could not be parsed or a row could not be written.
    #[error("Malformed feedback table: {0}")]
    Csv(#[source] csv::Error),

    /// Any other I/O failure.
    #[error("Feedback I/O error: {0}")]
    Other(#[source] std::io::Error),
}

/// Maps an I/O error to the storage taxonomy.
///
/// `PermissionDenied` and `WouldBlock` are how the OS reports a file held
/// by another process; everything else is `Other`.
fn classify_io(err: std::io::Error) -> StorageError {
    match err.kind() {
        std::io::ErrorKind::PermissionDenied | std::io::ErrorKind::WouldBlock => {
            StorageError::Locked(err)
        }
        _ => StorageError::Other(err),
    }
}

/// Binary helpfulness rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// The answer helped.
    Yes,
    /// The answer did not help.
    No,
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rating::Yes => write!(f, "yes"),
            Rating::No => write!(f, "no"),
        }
    }
}

/// One persisted rating row: `Timestamp, Helpful, Suggestion`.
///
/// The `Suggestion` column holds the question the rating refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingRecord {
    /// When the rating was submitted, as `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    /// Whether the answer was helpful.
    #[serde(rename = "Helpful")]
    pub helpful: Rating,

    /// The question that was rated.
    #[serde(rename = "Suggestion")]
    pub suggestion: String,
}

impl RatingRecord {
    /// Creates a rating row stamped with the current time.
    #[must_use]
    pub fn new(helpful: Rating, question: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            helpful,
            suggestion: question.into(),
        }
    }
}

/// One persisted free-text row: `Timestamp, Feedback`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRecord {
    /// When the feedback was submitted, as `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,

    /// The free-text comment.
    #[serde(rename = "Feedback")]
    pub feedback: String,
}

impl OpenRecord {
    /// Creates a free-text row stamped with the current time.
    #[must_use]
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            timestamp: current_timestamp(),
            feedback: feedback.into(),
        }
    }
}

/// Formats the current UTC time for a feedback row.
///
/// Stored as a pre-formatted string so re-serializing rows read back from
/// disk cannot alter them.
fn current_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(TIMESTAMP_FORMAT)
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Append-only CSV store for one feedback record shape.
///
/// Each store is bound to a single file path. The two feedback shapes get
/// two independent instances that share no state.
#[derive(Debug, Clone)]
pub struct FeedbackStore<R> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R> FeedbackStore<R>
where
    R: Serialize + for<'de> Deserialize<'de>,
{
    /// Creates a store bound to `path`. The file is created on first append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Returns the file path this store writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record, preserving all existing rows.
    ///
    /// Reads the whole table (empty if the file does not exist), pushes the
    /// record, and rewrites the file with headers plus every row.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Locked`] when the file is held by another
    /// process, [`StorageError::Csv`] when the existing table is malformed,
    /// and [`StorageError::Other`] for any other I/O failure. All are
    /// recoverable; the caller may retry on the next user action.
    pub fn append(&self, record: R) -> Result<(), StorageError> {
        let mut rows = self.read_all()?;
        rows.push(record);
        self.write_all(&rows)
    }

    /// Reads every row currently in the table.
    ///
    /// A missing file is an empty table, not an error.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the file cannot be read or parsed.
    pub fn read_all(&self) -> Result<Vec<R>, StorageError> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(classify_io(err)),
        };

        let mut reader = csv::Reader::from_reader(bytes.as_slice());
        let mut rows = Vec::new();
        for row in reader.deserialize() {
            rows.push(row.map_err(StorageError::Csv)?);
        }
        Ok(rows)
    }

    /// Serializes `rows` and overwrites the file in one write.
    fn write_all(&self, rows: &[R]) -> Result<(), StorageError> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            for row in rows {
                writer.serialize(row).map_err(StorageError::Csv)?;
            }
            writer.flush().map_err(classify_io)?;
        }

        std::fs::write(&self.path, &buffer).map_err(classify_io)
    }
}
