use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::caption_extractor::DEFAULT_MAX_LINES;

/// Application configuration module
/// This module handles loading, validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of lines per extracted text file
    #[serde(default = "default_max_lines_per_file")]
    pub max_lines_per_file: usize,

    /// Whether replacement text goes through the cleaning pass
    #[serde(default = "default_true")]
    pub clean_replacement_text: bool,

    /// Names of files derived from dropped/opened inputs
    #[serde(default)]
    pub naming: OutputNaming,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Suffixes used to derive output names next to an input file
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputNaming {
    // @field: Extraction base name suffix, e.g. movie_text.txt
    #[serde(default = "default_extract_suffix")]
    pub extract_suffix: String,

    // @field: Replacement output suffix, e.g. movie_replaced.vtt
    #[serde(default = "default_replace_suffix")]
    pub replace_suffix: String,

    // @field: Cleaning base name suffix, e.g. notes_cleaned.txt
    #[serde(default = "default_clean_suffix")]
    pub clean_suffix: String,

    // @field: Extension for extracted and cleaned text
    #[serde(default = "default_text_extension")]
    pub text_extension: String,
}

impl Default for OutputNaming {
    fn default() -> Self {
        Self {
            extract_suffix: default_extract_suffix(),
            replace_suffix: default_replace_suffix(),
            clean_suffix: default_clean_suffix(),
            text_extension: default_text_extension(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching log crate filter
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

fn default_max_lines_per_file() -> usize {
    DEFAULT_MAX_LINES
}

fn default_true() -> bool {
    true
}

fn default_extract_suffix() -> String {
    "_text".to_string()
}

fn default_replace_suffix() -> String {
    "_replaced".to_string()
}

fn default_clean_suffix() -> String {
    "_cleaned".to_string()
}

fn default_text_extension() -> String {
    "txt".to_string()
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize config to JSON")?;

        std::fs::write(path, json)
            .with_context(|| format!("Failed to write config to file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.max_lines_per_file == 0 {
            return Err(anyhow!("max_lines_per_file must be at least 1"));
        }

        let suffixes = [
            ("extract_suffix", &self.naming.extract_suffix),
            ("replace_suffix", &self.naming.replace_suffix),
            ("clean_suffix", &self.naming.clean_suffix),
        ];
        for (name, suffix) in suffixes {
            if suffix.is_empty() {
                // Derived name could collide with the input
                return Err(anyhow!("{} must not be empty", name));
            }
            if suffix.contains(['/', '\\']) {
                return Err(anyhow!("{} must not contain path separators: {}", name, suffix));
            }
        }

        if self.naming.text_extension.trim_start_matches('.').is_empty() {
            return Err(anyhow!("text_extension must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            max_lines_per_file: default_max_lines_per_file(),
            clean_replacement_text: true,
            naming: OutputNaming::default(),
            log_level: LogLevel::default(),
        }
    }
}
