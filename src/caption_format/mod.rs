/*!
 * Caption file model and codecs.
 *
 * A caption file is loaded into a `CaptionDocument`: the file header, then an
 * ordered list of blocks, most of which are timed cues. Codecs sit behind the
 * narrow `CaptionCodec` trait so the text operations never depend on the
 * details of a particular format:
 * - `webvtt`: WebVTT (`.vtt`)
 * - `srt`: SubRip (`.srt`)
 */

use std::fmt;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::{CaptionError, ProcessError};
use crate::file_utils::FileManager;

pub mod srt;
pub mod webvtt;

pub use srt::SrtCodec;
pub use webvtt::WebVttCodec;

// @const: Inline markup such as <i>, </b>, <v Bob> or <00:00:01.000>
static MARKUP_TAG_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Parse/serialize contract every caption format implements
pub trait CaptionCodec {
    /// Parse file content into an ordered document
    fn parse(&self, content: &str) -> Result<CaptionDocument, CaptionError>;

    /// Serialize a document back to file content
    fn serialize(&self, document: &CaptionDocument) -> String;
}

/// Supported caption formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFormat {
    /// Web Video Text Tracks
    WebVtt,
    /// SubRip
    Srt,
}

impl CaptionFormat {
    /// Resolve a format from a bare extension, case-insensitively
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.trim_start_matches('.').to_lowercase().as_str() {
            "vtt" => Some(Self::WebVtt),
            "srt" => Some(Self::Srt),
            _ => None,
        }
    }

    /// Resolve a format from a file path's extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CaptionError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::from_extension(&extension)
            .ok_or_else(|| CaptionError::UnsupportedFormat(path.display().to_string()))
    }

    /// Codec for this format
    pub fn codec(&self) -> &'static dyn CaptionCodec {
        match self {
            Self::WebVtt => &WebVttCodec,
            Self::Srt => &SrtCodec,
        }
    }

    /// Format milliseconds as this format's timestamp
    pub fn format_timestamp(&self, ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        let separator = match self {
            Self::WebVtt => '.',
            Self::Srt => ',',
        };

        format!("{:02}:{:02}:{:02}{}{:03}", hours, minutes, seconds, separator, millis)
    }
}

impl fmt::Display for CaptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WebVtt => write!(f, "WebVTT"),
            Self::Srt => write!(f, "SRT"),
        }
    }
}

/// Single timed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Optional identifier line (SRT sequence number or WebVTT cue id)
    pub identifier: Option<String>,

    /// Start time in ms
    pub start_time_ms: u64,

    /// End time in ms
    pub end_time_ms: u64,

    /// Timing line exactly as it appeared in the source, cue settings included
    pub timing: String,

    /// Caption text, lines separated by '\n'
    pub text: String,
}

impl Cue {
    /// Create a cue with a freshly formatted timing line
    pub fn new(format: CaptionFormat, start_time_ms: u64, end_time_ms: u64, text: impl Into<String>) -> Self {
        let timing = format!(
            "{} --> {}",
            format.format_timestamp(start_time_ms),
            format.format_timestamp(end_time_ms)
        );

        Cue {
            identifier: None,
            start_time_ms,
            end_time_ms,
            timing,
            text: text.into(),
        }
    }

    /// Text lines of the cue
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Cue text with inline markup tags removed
    pub fn plain_text(&self) -> String {
        MARKUP_TAG_REGEX.replace_all(&self.text, "").into_owned()
    }

    /// Overwrite the text payload; timing is left alone
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(identifier) = &self.identifier {
            writeln!(f, "{}", identifier)?;
        }
        writeln!(f, "{}", self.timing)?;
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// A block of a caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Timed cue
    Cue(Cue),
    /// Non-cue block kept as-is (NOTE, STYLE, REGION)
    Verbatim(Vec<String>),
}

/// Ordered contents of one caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionDocument {
    /// Format the document was parsed from
    pub format: CaptionFormat,

    /// Header lines (the WEBVTT line and its metadata; empty for SRT)
    pub header: Vec<String>,

    /// Blocks in file order
    pub blocks: Vec<Block>,
}

impl CaptionDocument {
    /// Create an empty document with the format's default header
    pub fn new(format: CaptionFormat) -> Self {
        let header = match format {
            CaptionFormat::WebVtt => vec!["WEBVTT".to_string()],
            CaptionFormat::Srt => Vec::new(),
        };

        CaptionDocument {
            format,
            header,
            blocks: Vec::new(),
        }
    }

    /// Append a cue
    pub fn push_cue(&mut self, cue: Cue) {
        self.blocks.push(Block::Cue(cue));
    }

    /// Cues in file order
    pub fn cues(&self) -> impl Iterator<Item = &Cue> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Cue(cue) => Some(cue),
            Block::Verbatim(_) => None,
        })
    }

    /// Mutable cues in file order
    pub fn cues_mut(&mut self) -> impl Iterator<Item = &mut Cue> {
        self.blocks.iter_mut().filter_map(|block| match block {
            Block::Cue(cue) => Some(cue),
            Block::Verbatim(_) => None,
        })
    }

    /// Number of cues
    pub fn cue_count(&self) -> usize {
        self.cues().count()
    }

    /// Parse content with the codec for `format`
    pub fn parse(format: CaptionFormat, content: &str) -> Result<Self, CaptionError> {
        format.codec().parse(content)
    }

    /// Serialize with the document's own codec
    pub fn serialize(&self) -> String {
        self.format.codec().serialize(self)
    }

    /// Load a caption file, picking the codec from its extension
    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, ProcessError> {
        let path = path.as_ref();

        let format = CaptionFormat::from_path(path).map_err(|source| ProcessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let content = FileManager::read_to_string(path)?;
        let document = Self::parse(format, &content).map_err(|source| ProcessError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Parsed {} cues from {} file {:?}", document.cue_count(), format, path);
        Ok(document)
    }

    /// Serialize and write to `path`, creating or truncating it
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<(), ProcessError> {
        FileManager::write_to_file(path, &self.serialize())
    }
}

/// Parse `H:MM:SS.mmm`-style timestamp captures into milliseconds
fn captures_to_ms(caps: &regex::Captures) -> Option<u64> {
    let field = |name: &str| -> Option<u64> {
        caps.name(name).map_or(Some(0), |m| m.as_str().parse().ok())
    };

    let hours = field("h")?;
    let minutes = field("m")?;
    let seconds = field("s")?;
    let millis = field("ms")?;

    if minutes >= 60 || seconds >= 60 {
        return None;
    }

    hours
        .checked_mul(3_600_000)?
        .checked_add(minutes * 60_000 + seconds * 1_000 + millis)
}

/// Split a `start --> end [settings]` line and parse both timestamps with `timestamp`
fn parse_timing_line(line: &str, timestamp: &Regex) -> Option<(u64, u64)> {
    let (start, rest) = line.split_once("-->")?;
    let end = rest.split_whitespace().next()?;

    let start_ms = timestamp.captures(start.trim()).and_then(|caps| captures_to_ms(&caps))?;
    let end_ms = timestamp.captures(end).and_then(|caps| captures_to_ms(&caps))?;

    Some((start_ms, end_ms))
}

/// Group non-blank lines into blocks separated by blank lines, keeping 1-based line numbers
fn split_blocks<'a, I>(lines: I) -> Vec<Vec<(usize, &'a str)>>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (number, line) in lines {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push((number, line));
        }
    }

    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Build a cue from a block: optional identifier line, timing line, text lines
fn cue_from_block(block: &[(usize, &str)], timestamp: &Regex) -> Result<Cue, CaptionError> {
    let (first_number, first_line) = block[0];

    let (identifier, timing_index) = if first_line.contains("-->") {
        (None, 0)
    } else {
        match block.get(1) {
            Some((_, line)) if line.contains("-->") => (Some(first_line.trim().to_string()), 1),
            _ => return Err(CaptionError::MissingTiming { line: first_number }),
        }
    };

    let (timing_number, timing_line) = block[timing_index];
    let (start_time_ms, end_time_ms) =
        parse_timing_line(timing_line, timestamp).ok_or_else(|| CaptionError::InvalidTiming {
            line: timing_number,
            value: timing_line.to_string(),
        })?;

    let text = block[timing_index + 1..]
        .iter()
        .map(|(_, line)| *line)
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Cue {
        identifier,
        start_time_ms,
        end_time_ms,
        timing: timing_line.to_string(),
        text,
    })
}
