/*!
 * Tests for the caption document model and codecs
 */

use anyhow::Result;
use subtext::caption_format::{Block, CaptionDocument, CaptionFormat, Cue};
use subtext::errors::{CaptionError, ProcessError};

use crate::common;

/// Test that the sample parses with its structure intact
#[test]
fn test_parse_webvtt_withSampleFile_shouldReadAllBlocks() -> Result<()> {
    let document = CaptionDocument::parse(CaptionFormat::WebVtt, common::SAMPLE_VTT)?;

    assert_eq!(document.header, vec!["WEBVTT", "Kind: captions", "Language: en"]);
    assert_eq!(document.cue_count(), 4);
    assert!(matches!(&document.blocks[0], Block::Verbatim(lines) if lines[0] == "NOTE exported from the editor"));

    let first = document.cues().next().unwrap();
    assert_eq!(first.identifier.as_deref(), Some("1"));
    assert_eq!(first.start_time_ms, 1_000);
    assert_eq!(first.end_time_ms, 4_000);
    assert_eq!(first.lines().count(), 2);
    Ok(())
}

/// Test that serialization reproduces the file exactly
#[test]
fn test_serialize_webvtt_withSampleFile_shouldRoundTripExactly() -> Result<()> {
    let document = CaptionDocument::parse(CaptionFormat::WebVtt, common::SAMPLE_VTT)?;
    assert_eq!(document.serialize(), common::SAMPLE_VTT);
    Ok(())
}

/// Test that large hour values and short timestamps parse
#[test]
fn test_parse_webvtt_withVariousTimestampForms_shouldConvertToMilliseconds() -> Result<()> {
    let content = "WEBVTT\n\n01:02.003 --> 123:00:00.000\nLong\n";
    let document = CaptionDocument::parse(CaptionFormat::WebVtt, content)?;
    let cue = document.cues().next().unwrap();

    assert_eq!(cue.start_time_ms, 62_003);
    assert_eq!(cue.end_time_ms, 123 * 3_600_000);
    Ok(())
}

/// Test that out-of-range minutes are rejected
#[test]
fn test_parse_webvtt_withInvalidMinutes_shouldFail() {
    let content = "WEBVTT\n\n00:61:00.000 --> 00:62:00.000\nBad\n";
    let result = CaptionDocument::parse(CaptionFormat::WebVtt, content);
    assert!(matches!(result, Err(CaptionError::InvalidTiming { line: 3, .. })));
}

/// Test the SRT codec against a numbered sample
#[test]
fn test_parse_srt_withThreeEntries_shouldKeepSequenceNumbers() -> Result<()> {
    let content = "1\n00:00:01,000 --> 00:00:04,000\nThis is a test subtitle.\n\n2\n00:00:05,000 --> 00:00:09,000\nIt contains multiple entries.\n\n3\n00:00:10,000 --> 00:00:14,000\nFor testing purposes.\n";
    let document = CaptionDocument::parse(CaptionFormat::Srt, content)?;

    let ids: Vec<_> = document.cues().map(|cue| cue.identifier.clone().unwrap_or_default()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(document.cues().nth(2).unwrap().end_time_ms, 14_000);
    Ok(())
}

/// Test that a new cue gets a well formed timing line
#[test]
fn test_cue_new_shouldFormatTimingForFormat() {
    let cue = Cue::new(CaptionFormat::Srt, 61_234, 65_432, "Hello");
    assert_eq!(cue.timing, "00:01:01,234 --> 00:01:05,432");

    let cue = Cue::new(CaptionFormat::WebVtt, 61_234, 65_432, "Hello");
    assert_eq!(cue.timing, "00:01:01.234 --> 00:01:05.432");
}

/// Test loading from disk picks the codec by extension
#[test]
fn test_read_from_withUnsupportedExtension_shouldReturnParseError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "captions.ass", "[Script Info]\n")?;

    let result = CaptionDocument::read_from(&path);

    assert!(matches!(
        result,
        Err(ProcessError::Parse {
            source: CaptionError::UnsupportedFormat(_),
            ..
        })
    ));
    Ok(())
}

/// Test that a malformed file surfaces the underlying cause
#[test]
fn test_read_from_withMalformedVtt_shouldNameCause() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "broken.vtt", "Not a caption file\n")?;

    let error = CaptionDocument::read_from(&path).unwrap_err();
    let message = error.to_string();

    assert!(message.contains("broken.vtt"));
    assert!(message.contains("WEBVTT"));
    Ok(())
}
