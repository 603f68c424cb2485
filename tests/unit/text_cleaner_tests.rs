/*!
 * Tests for text cleaning
 */

use std::fs;

use anyhow::Result;
use subtext::errors::ProcessError;
use subtext::text_cleaner::{clean_line, clean_lines, clean_text, clean_text_file, clean_text_file_to};

use crate::common;

/// Test the canonical artifact-laden line
#[test]
fn test_clean_line_withNumberPrefixAndEntities_shouldReturnPlainText() {
    assert_eq!(clean_line("200.  Hello&nbsp;&nbsp;world  ").as_deref(), Some("Hello world"));
}

/// Test that cleaning cleaned output changes nothing
#[test]
fn test_clean_lines_appliedTwice_shouldBeIdempotent() {
    let raw = vec![
        "1. First line",
        "  2.Second&nbsp;line  with   gaps",
        "",
        "   ",
        "3. 4. Stacked numbers",
        "5.&nbsp;6. Entity between numbers",
        "No number here",
        "12.5 percent",
        "\tTabbed 7. middle",
    ];

    let once = clean_lines(&raw);
    let twice = clean_lines(&once);

    assert_eq!(once, twice);
    for line in &once {
        assert!(!line.is_empty());
        assert!(!line.contains("&nbsp;"));
        assert!(!line.contains("  "));
    }
}

/// Test ordering and blank line removal
#[test]
fn test_clean_text_withBlankLines_shouldKeepOrderAndDropBlanks() {
    let content = "3. Third\n\n1. First\r\n   \n2. Second\n";
    assert_eq!(clean_text(content), vec!["Third", "First", "Second"]);
}

/// Test that duplicates survive
#[test]
fn test_clean_text_withDuplicates_shouldNotDeduplicate() {
    assert_eq!(clean_text("Yes\nYes\n1. Yes"), vec!["Yes", "Yes", "Yes"]);
}

/// Test writing the cleaned file
#[test]
fn test_clean_text_file_to_withValidInput_shouldWriteNewlineTerminatedLines() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "notes.txt", "1. Hi&nbsp;there\n\n2.  Bye\n")?;
    let output = temp_dir.path().join("notes_clean.txt");

    let count = clean_text_file_to(&input, &output)?;

    assert_eq!(count, 2);
    assert_eq!(fs::read_to_string(&output)?, "Hi there\nBye\n");
    Ok(())
}

/// Test reading a file with a byte order mark
#[test]
fn test_clean_text_file_withBom_shouldIgnoreBom() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "bom.txt", "\u{feff}1. Start\n")?;

    assert_eq!(clean_text_file(&input)?, vec!["Start"]);
    Ok(())
}

/// Test the missing source error
#[test]
fn test_clean_text_file_withMissingFile_shouldReturnSourceReadError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.txt");

    let result = clean_text_file(&missing);

    match result {
        Err(ProcessError::SourceRead { path, .. }) => assert_eq!(path, missing),
        other => panic!("expected SourceRead error, got {:?}", other),
    }
    Ok(())
}
