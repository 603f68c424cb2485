use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::{cue_from_block, split_blocks, Block, CaptionCodec, CaptionDocument, CaptionFormat};
use crate::errors::CaptionError;

// @module: SubRip codec

// @const: SRT timestamp; some encoders write '.' instead of ','
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<h>\d{1,3}):(?P<m>\d{2}):(?P<s>\d{2})[,.](?P<ms>\d{3})$").unwrap()
});

/// SubRip parser and serializer
#[derive(Debug, Clone, Copy, Default)]
pub struct SrtCodec;

impl CaptionCodec for SrtCodec {
    fn parse(&self, content: &str) -> Result<CaptionDocument, CaptionError> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let lines = content.lines().enumerate().map(|(i, line)| (i + 1, line));

        let mut document = CaptionDocument::new(CaptionFormat::Srt);

        for block in split_blocks(lines) {
            let cue = cue_from_block(&block, &TIMESTAMP_REGEX)?;

            if let Some(identifier) = &cue.identifier {
                if identifier.parse::<usize>().is_err() {
                    warn!("Unexpected sequence number at line {}: {}", block[0].0, identifier);
                }
            }

            document.push_cue(cue);
        }

        if document.blocks.is_empty() {
            warn!("No subtitle entries found in SRT content");
        }

        // Keep file order; overlapping entries are reported, never re-sorted
        let cues: Vec<_> = document.cues().collect();
        let overlap_count = cues
            .windows(2)
            .filter(|pair| pair[0].end_time_ms > pair[1].start_time_ms)
            .count();
        if overlap_count > 0 {
            debug!("Found {} overlapping subtitle entries", overlap_count);
        }

        Ok(document)
    }

    fn serialize(&self, document: &CaptionDocument) -> String {
        let mut output = String::new();
        let mut seq_num = 0;

        for block in &document.blocks {
            match block {
                Block::Cue(cue) => {
                    // Missing numbers continue from the previous numbered entry
                    match cue.identifier.as_deref().map(str::parse::<usize>) {
                        Some(Ok(number)) => seq_num = number,
                        Some(Err(_)) => seq_num += 1,
                        None => {
                            seq_num += 1;
                            output.push_str(&format!("{}\n", seq_num));
                        }
                    }
                    output.push_str(&cue.to_string());
                }
                Block::Verbatim(lines) => {
                    for line in lines {
                        output.push_str(line);
                        output.push('\n');
                    }
                }
            }
            output.push('\n');
        }

        output
    }
}
