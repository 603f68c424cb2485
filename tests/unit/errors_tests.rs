/*!
 * Tests for error types and conversions
 */

use std::error::Error;
use std::io;
use std::path::PathBuf;

use subtext::errors::{AppError, CaptionError, ProcessError};

#[test]
fn test_captionError_invalidTiming_shouldDisplayLineAndValue() {
    let error = CaptionError::InvalidTiming {
        line: 12,
        value: "00:00 --> later".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("12"));
    assert!(display.contains("00:00 --> later"));
}

#[test]
fn test_processError_countMismatch_shouldNameBothCounts() {
    let error = ProcessError::CountMismatch { lines: 4, cues: 5 };
    let display = format!("{}", error);
    assert_eq!(
        display,
        "Number of non-empty lines in text file (4) doesn't match number of captions in caption file (5)"
    );
}

#[test]
fn test_processError_parse_shouldKeepSourceChain() {
    let error = ProcessError::Parse {
        path: PathBuf::from("movie.vtt"),
        source: CaptionError::MissingHeader,
    };
    let display = format!("{}", error);
    assert!(display.contains("movie.vtt"));
    assert!(display.contains("WEBVTT"));
    assert!(error.source().is_some());
}

#[test]
fn test_processError_sourceRead_shouldIncludeIoCause() {
    let error = ProcessError::SourceRead {
        path: PathBuf::from("notes.txt"),
        source: io::Error::new(io::ErrorKind::NotFound, "No such file"),
    };
    let display = format!("{}", error);
    assert!(display.contains("notes.txt"));
    assert!(display.contains("No such file"));
}

#[test]
fn test_appError_fromProcessError_shouldDisplayVerbatim() {
    let app_error: AppError = ProcessError::CountMismatch { lines: 1, cues: 2 }.into();
    assert_eq!(
        app_error.to_string(),
        ProcessError::CountMismatch { lines: 1, cues: 2 }.to_string()
    );
}

#[test]
fn test_appError_fromIoError_shouldWrapAsFileError() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
    let app_error: AppError = io_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("File error"));
    assert!(display.contains("File not found"));
}

#[test]
fn test_appError_fromAnyhowError_shouldWrapAsUnknown() {
    let anyhow_error = anyhow::anyhow!("Something went wrong");
    let app_error: AppError = anyhow_error.into();
    let display = format!("{}", app_error);
    assert!(display.contains("Unknown error"));
    assert!(display.contains("Something went wrong"));
}

#[test]
fn test_appError_debug_shouldBeImplemented() {
    let error = AppError::UnsupportedFiles("test".to_string());
    let debug = format!("{:?}", error);
    assert!(debug.contains("UnsupportedFiles"));
}
