/*!
 * Tests for dialogue extraction and pagination
 */

use std::fs;

use anyhow::Result;
use subtext::caption_extractor::{extract_caption_text, extract_lines, ExtractedFiles, DEFAULT_MAX_LINES};
use subtext::caption_format::{CaptionDocument, CaptionFormat};
use subtext::errors::ProcessError;

use crate::common;

/// Test that each cue yields one cleaned line in order
#[test]
fn test_extract_lines_withSampleFile_shouldSkipEmptyCues() -> Result<()> {
    let document = CaptionDocument::parse(CaptionFormat::WebVtt, common::SAMPLE_VTT)?;

    let lines = extract_lines(&document);

    assert_eq!(lines, vec!["Hello there, how are you?", "I'm fine.", "Goodbye"]);
    assert!(lines.len() <= document.cue_count());
    Ok(())
}

/// Test joining of multi-line cues with entities
#[test]
fn test_extract_lines_withMultilineEntityCue_shouldJoinWithSpace() -> Result<()> {
    let content = "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHi&nbsp;there\nyou\n";
    let document = CaptionDocument::parse(CaptionFormat::WebVtt, content)?;

    assert_eq!(extract_lines(&document), vec!["Hi there you"]);
    Ok(())
}

/// Test the single file case
#[test]
fn test_extract_caption_text_withFewLines_shouldWriteSingleFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_sample_vtt(temp_dir.path(), "movie.vtt")?;
    let output = temp_dir.path().join("movie_text.txt");

    let extracted = extract_caption_text(&caption, &output, DEFAULT_MAX_LINES)?;

    let expected_path = temp_dir.path().join("movie_text_3lines.txt");
    assert_eq!(
        extracted,
        ExtractedFiles::Single {
            path: expected_path.clone(),
            line_count: 3
        }
    );
    assert_eq!(
        fs::read_to_string(&expected_path)?,
        "Hello there, how are you?\nI'm fine.\nGoodbye\n"
    );
    assert!(!output.exists());
    Ok(())
}

/// Test pagination sizes, names and concatenation
#[test]
fn test_extract_caption_text_withManyLines_shouldPaginateExactly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_test_file(temp_dir.path(), "long.vtt", &common::generate_vtt(7))?;
    let output = temp_dir.path().join("out.txt");

    let extracted = extract_caption_text(&caption, &output, 3)?;

    let paths = extracted.paths();
    assert_eq!(extracted.line_count(), 7);
    assert_eq!(paths.len(), 3);
    assert_eq!(paths[0], temp_dir.path().join("out_1of3_3lines.txt"));
    assert_eq!(paths[1], temp_dir.path().join("out_2of3_3lines.txt"));
    assert_eq!(paths[2], temp_dir.path().join("out_3of3_1lines.txt"));

    let mut all_lines = Vec::new();
    for path in &paths {
        all_lines.extend(common::read_lines(path)?);
    }
    let expected: Vec<String> = (1..=7).map(|i| format!("Line {}", i)).collect();
    assert_eq!(all_lines, expected);
    Ok(())
}

/// Test that an exact multiple produces no trailing empty page
#[test]
fn test_extract_caption_text_withExactMultiple_shouldWriteFullPagesOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_test_file(temp_dir.path(), "even.vtt", &common::generate_vtt(6))?;

    let extracted = extract_caption_text(&caption, temp_dir.path().join("even.txt"), 3)?;

    match extracted {
        ExtractedFiles::Paginated { paths, line_count } => {
            assert_eq!(line_count, 6);
            assert_eq!(paths.len(), 2);
            for path in &paths {
                assert_eq!(common::read_lines(path)?.len(), 3);
            }
        }
        other => panic!("expected paginated output, got {:?}", other),
    }
    Ok(())
}

/// Test that exactly max_lines lines stay in one file
#[test]
fn test_extract_caption_text_withExactlyMaxLines_shouldNotPaginate() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_test_file(temp_dir.path(), "three.vtt", &common::generate_vtt(3))?;

    let extracted = extract_caption_text(&caption, temp_dir.path().join("three.txt"), 3)?;

    assert!(matches!(extracted, ExtractedFiles::Single { line_count: 3, .. }));
    Ok(())
}

/// Test a caption file without cues
#[test]
fn test_extract_caption_text_withNoCues_shouldWriteEmptyFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_test_file(temp_dir.path(), "empty.vtt", "WEBVTT\n")?;

    let extracted = extract_caption_text(&caption, temp_dir.path().join("empty.txt"), 300)?;

    let expected = temp_dir.path().join("empty_0lines.txt");
    assert_eq!(extracted.paths(), vec![expected.as_path()]);
    assert_eq!(fs::read_to_string(&expected)?, "");
    Ok(())
}

/// Test rejection of a zero page size
#[test]
fn test_extract_caption_text_withZeroMaxLines_shouldRejectRequest() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_sample_vtt(temp_dir.path(), "movie.vtt")?;

    let result = extract_caption_text(&caption, temp_dir.path().join("out.txt"), 0);

    assert!(matches!(result, Err(ProcessError::InvalidRequest(_))));
    Ok(())
}

/// Test a destination in a missing directory
#[test]
fn test_extract_caption_text_withMissingOutputDir_shouldReturnWriteError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let caption = common::create_sample_vtt(temp_dir.path(), "movie.vtt")?;
    let output = temp_dir.path().join("no_such_dir").join("out.txt");

    let result = extract_caption_text(&caption, &output, 300);

    assert!(matches!(result, Err(ProcessError::DestinationWrite { .. })));
    Ok(())
}
