/*!
 * Dialogue extraction from caption files.
 *
 * Every cue becomes one line of plain text (multi-line cues are joined with a
 * space, markup is stripped and spacing normalized). Cues that end up empty
 * are skipped. Long results are split across several files so that each
 * stays small enough to edit comfortably.
 */

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::caption_format::{CaptionDocument, Cue};
use crate::errors::ProcessError;
use crate::file_utils::FileManager;
use crate::text_cleaner;

/// Default maximum number of lines per output file
pub const DEFAULT_MAX_LINES: usize = 300;

/// Files written by an extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedFiles {
    /// Everything fit in one file
    Single {
        path: PathBuf,
        line_count: usize,
    },
    /// Output was split into pages, in order
    Paginated {
        paths: Vec<PathBuf>,
        line_count: usize,
    },
}

impl ExtractedFiles {
    /// All written paths in order
    pub fn paths(&self) -> Vec<&Path> {
        match self {
            Self::Single { path, .. } => vec![path.as_path()],
            Self::Paginated { paths, .. } => paths.iter().map(PathBuf::as_path).collect(),
        }
    }

    /// Total number of extracted lines
    pub fn line_count(&self) -> usize {
        match self {
            Self::Single { line_count, .. } | Self::Paginated { line_count, .. } => *line_count,
        }
    }
}

/// One line of dialogue for a cue; `None` when the cue has no visible text
pub fn extract_cue_text(cue: &Cue) -> Option<String> {
    let plain = cue.plain_text();
    let merged = plain.lines().collect::<Vec<_>>().join(" ");
    let line = text_cleaner::normalize_spacing(&merged);

    if line.is_empty() {
        None
    } else {
        Some(line)
    }
}

/// Dialogue lines for every non-empty cue, in cue order
pub fn extract_lines(document: &CaptionDocument) -> Vec<String> {
    document.cues().filter_map(extract_cue_text).collect()
}

/// Split lines into consecutive pages of at most `max_lines`
pub fn paginate(lines: &[String], max_lines: usize) -> Vec<&[String]> {
    lines.chunks(max_lines.max(1)).collect()
}

/// Extract the dialogue of `caption_path` into text files derived from `output_path`.
///
/// Writes `<base>_<N>lines<ext>` when the lines fit in `max_lines`, otherwise
/// `<base>_<i>of<total>_<N>lines<ext>` per page. Pages already written stay
/// on disk if a later page fails.
pub fn extract_caption_text<P1: AsRef<Path>, P2: AsRef<Path>>(
    caption_path: P1,
    output_path: P2,
    max_lines: usize,
) -> Result<ExtractedFiles, ProcessError> {
    let caption_path = caption_path.as_ref();
    let output_path = output_path.as_ref();

    if max_lines == 0 {
        return Err(ProcessError::InvalidRequest(
            "maximum lines per file must be at least 1".to_string(),
        ));
    }

    let document = CaptionDocument::read_from(caption_path)?;
    let lines = extract_lines(&document);
    debug!(
        "Extracted {} lines from {} cues in {:?}",
        lines.len(),
        document.cue_count(),
        caption_path
    );

    if lines.len() <= max_lines {
        let path = FileManager::lines_output_path(output_path, lines.len());
        FileManager::write_lines(&path, &lines)?;

        info!("Successfully extracted {} lines from caption file to: {:?}", lines.len(), path);
        return Ok(ExtractedFiles::Single {
            path,
            line_count: lines.len(),
        });
    }

    let pages = paginate(&lines, max_lines);
    let total = pages.len();
    let mut paths = Vec::with_capacity(total);

    for (index, page) in pages.into_iter().enumerate() {
        let path = FileManager::page_output_path(output_path, index + 1, total, page.len());
        FileManager::write_lines(&path, page)?;
        debug!("Wrote page {}/{} ({} lines) to {:?}", index + 1, total, page.len(), path);
        paths.push(path);
    }

    info!("Successfully split {} lines from caption file into {} files", lines.len(), total);
    Ok(ExtractedFiles::Paginated {
        paths,
        line_count: lines.len(),
    })
}
