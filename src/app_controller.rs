use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::app_config::Config;
use crate::caption_extractor::{self, ExtractedFiles};
use crate::caption_replacer;
use crate::errors::AppError;
use crate::file_utils::{FileManager, FileType};
use crate::text_cleaner;

// @module: Application controller turning requests into operations

/// Notice shown for file selections no flow accepts
pub const UNSUPPORTED_FILES_NOTICE: &str = "Please drop .vtt, .srt or .txt files";

/// Extract the dialogue of a caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractRequest {
    /// Caption file to read
    pub caption: PathBuf,
    /// Base output path; the line count (and page) is embedded in the final names
    pub output: PathBuf,
    /// Maximum lines per written file
    pub max_lines: usize,
}

/// Replace the text of a caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceRequest {
    /// Caption file providing the timings
    pub caption: PathBuf,
    /// Text file providing one line per cue
    pub text: PathBuf,
    /// Caption file to write
    pub output: PathBuf,
    /// Run the cleaning pass over the text file first
    pub clean: bool,
}

/// Clean a text file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanRequest {
    /// Text file to read
    pub text: PathBuf,
    /// Output path, or base path when `embed_line_count` is set
    pub output: PathBuf,
    /// Append `_<N>lines` to the output name
    pub embed_line_count: bool,
}

/// One unit of work for the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Extract(ExtractRequest),
    Replace(ReplaceRequest),
    Clean(CleanRequest),
}

/// What to do with a single caption file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptionAction {
    /// Extract its dialogue
    Extract,
    /// Replace its text with the given text file
    Replace { text: PathBuf },
}

/// Routing decision for a set of dropped or opened files
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropPlan {
    /// A lone caption file: the user picks extract or replace
    ChooseCaptionAction { caption: PathBuf },
    /// A lone text file: cleaned right away
    CleanText { text: PathBuf },
    /// A caption file and a text file: replace with cleaning once confirmed
    ConfirmReplace { caption: PathBuf, text: PathBuf },
}

impl DropPlan {
    /// Classify `paths` the way the drop target routes them
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self, AppError> {
        if let Some(missing) = paths.iter().find(|p| !FileManager::file_exists(p)) {
            return Err(AppError::UnsupportedFiles(format!(
                "File not found: {}",
                missing.as_ref().display()
            )));
        }

        let mut captions = Vec::new();
        let mut texts = Vec::new();
        for path in paths {
            match FileManager::detect_file_type(path) {
                FileType::Captions(_) => captions.push(path.as_ref().to_path_buf()),
                FileType::Text => texts.push(path.as_ref().to_path_buf()),
                FileType::Unknown => {
                    debug!("Unsupported file in selection: {:?}", path.as_ref());
                    return Err(AppError::UnsupportedFiles(UNSUPPORTED_FILES_NOTICE.to_string()));
                }
            }
        }

        match (captions.as_slice(), texts.as_slice()) {
            ([caption], [text]) => Ok(Self::ConfirmReplace {
                caption: caption.clone(),
                text: text.clone(),
            }),
            ([caption], []) => Ok(Self::ChooseCaptionAction {
                caption: caption.clone(),
            }),
            ([], [text]) => Ok(Self::CleanText { text: text.clone() }),
            _ => Err(AppError::UnsupportedFiles(UNSUPPORTED_FILES_NOTICE.to_string())),
        }
    }
}

/// Main application controller
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self, AppError> {
        config
            .validate()
            .map_err(|e| AppError::Config(e.to_string()))?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Extraction request; defaults to `<stem>_text.txt` next to the caption file
    pub fn extract_request(&self, caption: PathBuf, output: Option<PathBuf>) -> ExtractRequest {
        let naming = &self.config.naming;
        let output = output.unwrap_or_else(|| {
            FileManager::sibling_output_path(&caption, &naming.extract_suffix, &naming.text_extension)
        });

        ExtractRequest {
            caption,
            output,
            max_lines: self.config.max_lines_per_file,
        }
    }

    /// Replacement request; defaults to `<stem>_replaced.<ext>` next to the caption file
    pub fn replace_request(&self, caption: PathBuf, text: PathBuf, output: Option<PathBuf>) -> ReplaceRequest {
        let output = output.unwrap_or_else(|| {
            let extension = caption
                .extension()
                .map(|ext| ext.to_string_lossy().to_string())
                .unwrap_or_default();
            FileManager::sibling_output_path(&caption, &self.config.naming.replace_suffix, &extension)
        });

        ReplaceRequest {
            caption,
            text,
            output,
            clean: self.config.clean_replacement_text,
        }
    }

    /// Cleaning request; without an explicit output, writes `<stem>_cleaned_<N>lines.txt`
    pub fn clean_request(&self, text: PathBuf, output: Option<PathBuf>) -> CleanRequest {
        match output {
            Some(output) => CleanRequest {
                text,
                output,
                embed_line_count: false,
            },
            None => {
                let naming = &self.config.naming;
                let output =
                    FileManager::sibling_output_path(&text, &naming.clean_suffix, &naming.text_extension);
                CleanRequest {
                    text,
                    output,
                    embed_line_count: true,
                }
            }
        }
    }

    /// Request for a lone caption file once the user picked an action
    pub fn caption_action_request(&self, caption: PathBuf, action: CaptionAction) -> Request {
        match action {
            CaptionAction::Extract => Request::Extract(self.extract_request(caption, None)),
            CaptionAction::Replace { text } => {
                let mut request = self.replace_request(caption, text, None);
                request.clean = true;
                Request::Replace(request)
            }
        }
    }

    /// Request for a confirmed caption + text drop; the text is always cleaned
    pub fn confirmed_replace_request(&self, caption: PathBuf, text: PathBuf) -> Request {
        let mut request = self.replace_request(caption, text, None);
        request.clean = true;
        Request::Replace(request)
    }

    /// Run one request and describe the outcome
    pub fn execute(&self, request: Request) -> Result<String, AppError> {
        match request {
            Request::Extract(request) => self.run_extract(request),
            Request::Replace(request) => self.run_replace(request),
            Request::Clean(request) => self.run_clean(request),
        }
    }

    fn run_extract(&self, request: ExtractRequest) -> Result<String, AppError> {
        info!("Extracting text from {:?}", request.caption);
        let extracted =
            caption_extractor::extract_caption_text(&request.caption, &request.output, request.max_lines)?;

        Ok(match extracted {
            ExtractedFiles::Single { path, .. } => format!(
                "Extracted text from {} to {}",
                request.caption.display(),
                path.display()
            ),
            ExtractedFiles::Paginated { paths, .. } => {
                let mut message = format!(
                    "Extracted text from {}, split into {} files:",
                    request.caption.display(),
                    paths.len()
                );
                for path in &paths {
                    message.push('\n');
                    message.push_str(&path.display().to_string());
                }
                message
            }
        })
    }

    fn run_replace(&self, request: ReplaceRequest) -> Result<String, AppError> {
        if request.output == request.caption {
            warn!("Output overwrites the source caption file: {:?}", request.output);
        }

        caption_replacer::replace_caption_text(&request.caption, &request.text, &request.output, request.clean)?;

        let cleaned = if request.clean { "cleaned " } else { "" };
        Ok(format!(
            "Replaced text in {} with {}{}",
            request.caption.display(),
            cleaned,
            request.text.display()
        ))
    }

    fn run_clean(&self, request: CleanRequest) -> Result<String, AppError> {
        let output = if request.embed_line_count {
            let lines = text_cleaner::clean_text_file(&request.text)?;
            let output = FileManager::lines_output_path(&request.output, lines.len());
            FileManager::write_lines(&output, &lines)?;
            output
        } else {
            text_cleaner::clean_text_file_to(&request.text, &request.output)?;
            request.output
        };

        Ok(format!(
            "Cleaned text file: {} -> {}",
            request.text.display(),
            output.display()
        ))
    }
}
