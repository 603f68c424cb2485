/*!
 * Caption text replacement.
 *
 * Pairs the lines of an edited text file with the cues of a caption file,
 * strictly one line per cue and in order, and writes a new caption file in
 * which only the text changed. Nothing is written unless the counts match.
 */

use std::path::Path;

use log::{debug, info};

use crate::caption_format::CaptionDocument;
use crate::errors::ProcessError;
use crate::file_utils::FileManager;
use crate::text_cleaner;

/// Replacement lines from `text_path`.
///
/// With `clean` the full cleaning pass runs; otherwise lines are only trimmed
/// and blank ones skipped.
pub fn read_replacement_lines<P: AsRef<Path>>(text_path: P, clean: bool) -> Result<Vec<String>, ProcessError> {
    if clean {
        return text_cleaner::clean_text_file(text_path);
    }

    let content = FileManager::read_to_string(text_path)?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Assign `lines` to the document's cues in order.
///
/// Fails without touching the document when the counts differ.
pub fn apply_replacements(document: &mut CaptionDocument, lines: Vec<String>) -> Result<(), ProcessError> {
    let cues = document.cue_count();
    if lines.len() != cues {
        return Err(ProcessError::CountMismatch {
            lines: lines.len(),
            cues,
        });
    }

    for (cue, line) in document.cues_mut().zip(lines) {
        cue.set_text(line);
    }

    Ok(())
}

/// Rewrite the cue text of `caption_path` with the lines of `text_path` and save to `output_path`.
///
/// Returns the number of cues rewritten.
pub fn replace_caption_text<P1, P2, P3>(
    caption_path: P1,
    text_path: P2,
    output_path: P3,
    clean: bool,
) -> Result<usize, ProcessError>
where
    P1: AsRef<Path>,
    P2: AsRef<Path>,
    P3: AsRef<Path>,
{
    let output_path = output_path.as_ref();

    let replacement_lines = read_replacement_lines(&text_path, clean)?;
    debug!(
        "Read {} replacement lines from {:?} (cleaned: {})",
        replacement_lines.len(),
        text_path.as_ref(),
        clean
    );

    let mut document = CaptionDocument::read_from(&caption_path)?;
    apply_replacements(&mut document, replacement_lines)?;

    document.write_to(output_path)?;

    let cue_count = document.cue_count();
    info!(
        "Successfully created new caption file with replaced text at: {:?}",
        output_path
    );
    Ok(cue_count)
}
