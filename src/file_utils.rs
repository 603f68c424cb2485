use std::fs;
use std::path::{Path, PathBuf};

use crate::caption_format::CaptionFormat;
use crate::errors::ProcessError;

// @module: File and path utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// Read a UTF-8 file to a string, dropping a leading byte order mark
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String, ProcessError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ProcessError::SourceRead {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(match content.strip_prefix('\u{feff}') {
            Some(stripped) => stripped.to_string(),
            None => content,
        })
    }

    /// Write a string to a file, creating or truncating it.
    ///
    /// Parent directories are not created: a missing directory is a write error.
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<(), ProcessError> {
        let path = path.as_ref();
        fs::write(path, content).map_err(|source| ProcessError::DestinationWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write lines to a file, each followed by a single newline
    pub fn write_lines<P: AsRef<Path>, S: AsRef<str>>(path: P, lines: &[S]) -> Result<(), ProcessError> {
        let mut content = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
        for line in lines {
            content.push_str(line.as_ref());
            content.push('\n');
        }
        Self::write_to_file(path, &content)
    }

    // @generates: Sibling path `<dir>/<stem><suffix>.<extension>`
    pub fn sibling_output_path<P: AsRef<Path>>(input_file: P, suffix: &str, extension: &str) -> PathBuf {
        let input_file = input_file.as_ref();
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();

        let mut output_filename = format!("{}{}", stem, suffix);
        if !extension.is_empty() {
            output_filename.push('.');
            output_filename.push_str(extension.trim_start_matches('.'));
        }

        input_file.with_file_name(output_filename)
    }

    /// Output path for a single file of `line_count` lines: `<base>_<N>lines<ext>`
    pub fn lines_output_path<P: AsRef<Path>>(base: P, line_count: usize) -> PathBuf {
        Self::decorate(base.as_ref(), &format!("_{}lines", line_count))
    }

    /// Output path for page `index` (1-based) of `total`: `<base>_<i>of<total>_<N>lines<ext>`
    pub fn page_output_path<P: AsRef<Path>>(base: P, index: usize, total: usize, line_count: usize) -> PathBuf {
        Self::decorate(base.as_ref(), &format!("_{}of{}_{}lines", index, total, line_count))
    }

    // Insert `tag` between the base name and the extension, in the same directory
    fn decorate(base: &Path, tag: &str) -> PathBuf {
        let stem = base.file_stem().unwrap_or_default().to_string_lossy();
        let filename = match base.extension() {
            Some(ext) => format!("{}{}.{}", stem, tag, ext.to_string_lossy()),
            None => format!("{}{}", stem, tag),
        };

        base.with_file_name(filename)
    }

    /// Classify a path by extension
    pub fn detect_file_type<P: AsRef<Path>>(path: P) -> FileType {
        let Some(ext) = path.as_ref().extension() else {
            return FileType::Unknown;
        };
        let ext = ext.to_string_lossy().to_lowercase();

        if let Some(format) = CaptionFormat::from_extension(&ext) {
            return FileType::Captions(format);
        }
        if ext == "txt" {
            return FileType::Text;
        }

        FileType::Unknown
    }
}

/// Enum representing the file types the shell routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// Caption file in a supported format
    Captions(CaptionFormat),
    /// Plain text file
    Text,
    /// Anything else
    Unknown,
}
