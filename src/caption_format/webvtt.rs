use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::{cue_from_block, split_blocks, Block, CaptionCodec, CaptionDocument, CaptionFormat};
use crate::errors::CaptionError;

// @module: WebVTT codec

// @const: WebVTT timestamp, hours optional
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?P<h>\d+):)?(?P<m>\d{2}):(?P<s>\d{2})\.(?P<ms>\d{3})$").unwrap()
});

// Blocks that are not cues and are carried through untouched
const VERBATIM_BLOCK_KEYWORDS: [&str; 3] = ["NOTE", "STYLE", "REGION"];

/// WebVTT parser and serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct WebVttCodec;

impl WebVttCodec {
    fn is_signature(line: &str) -> bool {
        match line.strip_prefix("WEBVTT") {
            Some(rest) => rest.is_empty() || rest.starts_with([' ', '\t']),
            None => false,
        }
    }

    fn is_verbatim_block(first_line: &str) -> bool {
        VERBATIM_BLOCK_KEYWORDS.iter().any(|keyword| {
            first_line
                .strip_prefix(keyword)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with([' ', '\t']))
        })
    }
}

impl CaptionCodec for WebVttCodec {
    fn parse(&self, content: &str) -> Result<CaptionDocument, CaptionError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = content.lines().enumerate().map(|(i, line)| (i + 1, line)).peekable();

        let mut document = CaptionDocument {
            format: CaptionFormat::WebVtt,
            header: Vec::new(),
            blocks: Vec::new(),
        };

        match lines.next() {
            Some((_, first)) if Self::is_signature(first) => document.header.push(first.to_string()),
            _ => return Err(CaptionError::MissingHeader),
        }

        // Header metadata runs until the first blank line or timing line
        while let Some((_, line)) =
            lines.next_if(|(_, line)| !line.trim().is_empty() && !line.contains("-->"))
        {
            document.header.push(line.to_string());
        }

        for block in split_blocks(lines) {
            if Self::is_verbatim_block(block[0].1) {
                document
                    .blocks
                    .push(Block::Verbatim(block.iter().map(|(_, line)| line.to_string()).collect()));
                continue;
            }

            document.push_cue(cue_from_block(&block, &TIMESTAMP_REGEX)?);
        }

        debug!(
            "WebVTT: {} header lines, {} blocks, {} cues",
            document.header.len(),
            document.blocks.len(),
            document.cue_count()
        );

        Ok(document)
    }

    fn serialize(&self, document: &CaptionDocument) -> String {
        let mut output = String::new();

        if document.header.is_empty() {
            output.push_str("WEBVTT\n");
        }
        for line in &document.header {
            output.push_str(line);
            output.push('\n');
        }

        for block in &document.blocks {
            output.push('\n');
            match block {
                Block::Cue(cue) => output.push_str(&cue.to_string()),
                Block::Verbatim(lines) => {
                    for line in lines {
                        output.push_str(line);
                        output.push('\n');
                    }
                }
            }
        }

        output
    }
}
