/*!
 * Plain-text cleaning.
 *
 * Normalizes dialogue exported from numbered-line editors: `&nbsp;` entities
 * become spaces, leading `N.` numbering is stripped, runs of spaces collapse
 * to one and blank lines are dropped. Cleaning an already cleaned line is a
 * no-op.
 */

use std::path::Path;

use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ProcessError;
use crate::file_utils::FileManager;

/// Entity exported by HTML-aware editors in place of a plain space
pub const NBSP_ENTITY: &str = "&nbsp;";

// @const: Leading line numbers such as "200." or "12. 13. "
static LINE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\s*\d+\.\s*)+").unwrap());

// @const: Two or more consecutive spaces
static MULTI_SPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Replace entities, trim and collapse spaces, keeping any line numbering.
///
/// This is the subset of cleaning that applies to caption cue text.
pub fn normalize_spacing(line: &str) -> String {
    let line = line.replace(NBSP_ENTITY, " ");
    MULTI_SPACE_REGEX.replace_all(line.trim(), " ").into_owned()
}

/// Clean a single line; `None` when nothing is left
pub fn clean_line(line: &str) -> Option<String> {
    let line = line.replace(NBSP_ENTITY, " ");
    let without_number = LINE_NUMBER_REGEX.replace(line.trim(), "");
    let cleaned = MULTI_SPACE_REGEX.replace_all(&without_number, " ");

    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.into_owned())
    }
}

/// Clean a sequence of lines, dropping the ones that end up empty
pub fn clean_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| clean_line(line.as_ref()))
        .collect()
}

/// Clean text content line by line
pub fn clean_text(content: &str) -> Vec<String> {
    clean_lines(content.lines())
}

/// Read and clean a text file
pub fn clean_text_file<P: AsRef<Path>>(input_path: P) -> Result<Vec<String>, ProcessError> {
    let input_path = input_path.as_ref();
    let content = FileManager::read_to_string(input_path)?;
    let cleaned = clean_text(&content);

    debug!(
        "Cleaned {:?}: {} input lines, {} kept",
        input_path,
        content.lines().count(),
        cleaned.len()
    );

    Ok(cleaned)
}

/// Clean a text file and write the result to `output_path`; returns the number of lines written
pub fn clean_text_file_to<P1: AsRef<Path>, P2: AsRef<Path>>(
    input_path: P1,
    output_path: P2,
) -> Result<usize, ProcessError> {
    let cleaned = clean_text_file(&input_path)?;
    FileManager::write_lines(&output_path, &cleaned)?;

    info!("Successfully cleaned text file and saved to: {:?}", output_path.as_ref());
    Ok(cleaned.len())
}
