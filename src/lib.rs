/*!
 * # subtext - caption dialogue extraction and replacement
 *
 * A Rust library for editing subtitle dialogue outside a subtitle editor.
 *
 * ## Features
 *
 * - Extract one line of plain text per caption cue (WebVTT and SRT)
 * - Split long extractions into several numbered text files
 * - Clean edited text (line numbers, `&nbsp;` entities, extra spaces)
 * - Write edited text back into the caption file with timings untouched
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `caption_format`: Cue model and the WebVTT/SRT codecs
 * - `text_cleaner`: Plain-text cleaning
 * - `caption_extractor`: Cue text extraction and pagination
 * - `caption_replacer`: Line-to-cue replacement
 * - `app_controller`: Request objects, drop routing and status reporting
 * - `app_config`: Configuration management
 * - `file_utils`: File system operations and derived file names
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
#![allow(clippy::uninlined_format_args)]

pub mod app_config;
pub mod app_controller;
pub mod caption_extractor;
pub mod caption_format;
pub mod caption_replacer;
pub mod errors;
pub mod file_utils;
pub mod text_cleaner;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, DropPlan, Request};
pub use caption_extractor::{extract_caption_text, ExtractedFiles, DEFAULT_MAX_LINES};
pub use caption_format::{CaptionDocument, CaptionFormat, Cue};
pub use caption_replacer::replace_caption_text;
pub use errors::{AppError, CaptionError, ProcessError};
pub use text_cleaner::{clean_line, clean_text_file, clean_text_file_to};
