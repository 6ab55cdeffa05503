//! Error types for bardtally.
//!
//! Malformed header lines and empty speaker names are not errors: the
//! classifier treats them as non-dialogue.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    /// The source could not be opened; it contributes nothing
    #[error("Source unavailable: {label}: {source}")]
    SourceUnavailable {
        label: String,
        #[source]
        source: io::Error,
    },

    /// Reading failed part-way; lines before `line` were already tallied
    #[error("Failed to read {label} at line {line}: {source}")]
    SourceRead {
        label: String,
        line: u64,
        #[source]
        source: io::Error,
    },

    /// The worker task panicked or was cancelled before finishing
    #[error("Worker for {label} did not complete: {message}")]
    WorkerAborted { label: String, message: String },

    /// The caller required every source and at least one failed
    #[error("{failed} of {total} sources failed")]
    IncompleteRun { failed: usize, total: usize },
}

impl TallyError {
    /// Label of the source this error belongs to, if any
    pub fn source_label(&self) -> Option<&str> {
        match self {
            TallyError::SourceUnavailable { label, .. }
            | TallyError::SourceRead { label, .. }
            | TallyError::WorkerAborted { label, .. } => Some(label.as_str()),
            TallyError::IncompleteRun { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
