/*!
 * Error types for the subtext application.
 *
 * This module contains custom error types for the different layers of the
 * application, using the thiserror crate for ergonomic error definitions:
 * - `CaptionError`: problems inside a caption file (format level)
 * - `ProcessError`: failures of the clean/extract/replace operations
 * - `AppError`: everything the command-line shell can report
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing caption content
#[derive(Error, Debug)]
pub enum CaptionError {
    /// WebVTT content that does not start with the `WEBVTT` signature
    #[error("Missing WEBVTT header: file must start with WEBVTT")]
    MissingHeader,

    /// A timing line that could not be parsed
    #[error("Invalid timing at line {line}: {value}")]
    InvalidTiming {
        /// 1-based line number in the source content
        line: usize,
        /// The offending line
        value: String,
    },

    /// A cue identifier or sequence number that is not followed by a timing line
    #[error("Missing timing line after line {line}")]
    MissingTiming {
        /// 1-based line number of the identifier
        line: usize,
    },

    /// File extension that no codec handles
    #[error("Unsupported caption format: {0}")]
    UnsupportedFormat(String),
}

/// Errors returned by the clean, extract and replace operations
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Source file missing or unreadable
    #[error("Failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Caption file that the parser rejected
    #[error("Error parsing captions from {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: CaptionError,
    },

    /// Replacement text does not line up with the caption cues
    #[error(
        "Number of non-empty lines in text file ({lines}) doesn't match number of captions in caption file ({cues})"
    )]
    CountMismatch {
        /// Replacement lines available
        lines: usize,
        /// Cues in the caption file
        cues: usize,
    },

    /// Destination not writable
    #[error("Failed to write {}: {source}", .path.display())]
    DestinationWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Request rejected before any file was touched
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from one of the text operations
    #[error("{0}")]
    Process(#[from] ProcessError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Files that no flow accepts
    #[error("Unsupported files: {0}")]
    UnsupportedFiles(String),

    /// Error from a file operation outside the core operations
    #[error("File error: {0}")]
    File(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<io::Error> for AppError {
    fn from(error: io::Error) -> Self {
        Self::File(error.to_string())
    }
}
