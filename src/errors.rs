//! Unified application error type.
//! All modules (store, cli, config, export) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Store lifecycle
    // ---------------------------
    #[error("Store not ready: '{operation}' called before initialize()")]
    NotReady { operation: &'static str },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Duplicate record for student {student_id} at {timestamp}")]
    DuplicateRecord {
        student_id: String,
        timestamp: String,
    },

    #[error("Schema mismatch: database is at version {found}, this build expects {expected}")]
    SchemaMismatch { found: i64, expected: i64 },

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid eligibility status: {0}")]
    InvalidStatus(String),

    #[error("Invalid verification method: {0}")]
    InvalidMethod(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for transient storage failures that a caller may retry with
    /// bounded backoff before giving up.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AppError::StorageUnavailable(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;
