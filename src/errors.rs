/*!
 * Error types for the podsrt application.
 *
 * This module contains custom error types for the transcript pipeline,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or converting a transcript
#[derive(Error, Debug)]
pub enum TranscriptError {
    /// The input transcript does not exist
    #[error("Input transcript not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// The input transcript exists but could not be read
    #[error("Failed to read transcript {}: {source}", .path.display())]
    Unreadable {
        /// Path of the transcript
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// The speaker rule table or other settings are inconsistent
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A subtitle file could not be parsed back
    #[error("Malformed subtitle block {block}: {message}")]
    MalformedSubtitle {
        /// 1-based block position in the file
        block: usize,
        /// What was wrong with it
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from transcript processing
    #[error("Transcript error: {0}")]
    Transcript(#[from] TranscriptError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<TranscriptError>() {
            Ok(transcript) => Self::Transcript(transcript),
            Err(other) => Self::Unknown(other.to_string()),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
