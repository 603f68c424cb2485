// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{debug, error, info, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use subtext::app_config::{self, Config};
use subtext::app_controller::{CaptionAction, Controller, DropPlan, Request};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Action for a single opened caption file
#[derive(Debug, Clone, ValueEnum)]
enum CliCaptionAction {
    Extract,
    Replace,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract one line of dialogue per cue into text file(s)
    Extract(ExtractArgs),

    /// Replace cue text with the lines of a text file, keeping timings
    Replace(ReplaceArgs),

    /// Clean a text file (line numbers, &nbsp; entities, extra spaces, blank lines)
    Clean(CleanArgs),

    /// Route files the way the drop target does
    Open(OpenArgs),

    /// Generate shell completions for subtext
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ExtractArgs {
    /// Caption file (.vtt or .srt)
    #[arg(value_name = "CAPTION_FILE")]
    caption: PathBuf,

    /// Base output path; the line count is added to the file name
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum lines per output file
    #[arg(short = 'n', long)]
    max_lines: Option<usize>,
}

#[derive(Parser, Debug)]
struct ReplaceArgs {
    /// Caption file providing the timings
    #[arg(value_name = "CAPTION_FILE")]
    caption: PathBuf,

    /// Text file with one line per cue
    #[arg(value_name = "TEXT_FILE")]
    text: PathBuf,

    /// Output caption file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Use the text lines as they are (only trimmed, blank lines skipped)
    #[arg(long)]
    no_clean: bool,
}

#[derive(Parser, Debug)]
struct CleanArgs {
    /// Text file to clean
    #[arg(value_name = "TEXT_FILE")]
    text: PathBuf,

    /// Exact output path (default: <stem>_cleaned_<N>lines.txt)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct OpenArgs {
    /// One caption file, one text file, or one of each
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    files: Vec<PathBuf>,

    /// Action for a lone caption file (asked on stdin when neither --action nor --with is given)
    #[arg(short, long, value_enum)]
    action: Option<CliCaptionAction>,

    /// Replacement text file for a lone caption file; implies --action replace
    #[arg(short, long = "with", value_name = "TEXT_FILE")]
    with_text: Option<PathBuf>,

    /// Replace without asking for confirmation
    #[arg(short, long)]
    yes: bool,
}

/// subtext - caption dialogue extraction and replacement
///
/// Extracts plain dialogue from caption files and writes edited dialogue back
/// with every timestamp untouched.
#[derive(Parser, Debug)]
#[command(name = "subtext")]
#[command(version)]
#[command(about = "Extract and replace caption dialogue")]
#[command(long_about = "subtext extracts dialogue from WebVTT/SRT caption files and replaces it with edited text.

EXAMPLES:
    subtext extract movie.vtt                     # Writes movie_text_<N>lines.txt
    subtext extract -n 100 movie.vtt -o out.txt   # Pages of 100 lines: out_1of3_100lines.txt, ...
    subtext replace movie.vtt edited.txt          # Writes movie_replaced.vtt
    subtext clean notes.txt                       # Writes notes_cleaned_<N>lines.txt
    subtext open movie.vtt edited.txt --yes       # Same routing as dropping both files
    subtext completions bash > subtext.bash       # Generate bash completions

CONFIGURATION:
    Settings are read from subtext.json when it exists. You can specify a
    different config file with --config-path.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "subtext.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI colour for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, colour) = Self::style_for_level(record.level());

            let mut stderr = io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn main() {
    // Logger level is lowered or raised once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialize logger: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subtext", &mut io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.config_path, cli.log_level.clone())?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config).context("Configuration validation failed")?;
    debug!("Using configuration: {:?}", controller.config());

    let request = match cli.command {
        Commands::Extract(args) => {
            let mut request = controller.extract_request(args.caption, args.output);
            if let Some(max_lines) = args.max_lines {
                request.max_lines = max_lines;
            }
            Some(Request::Extract(request))
        }
        Commands::Replace(args) => {
            let mut request = controller.replace_request(args.caption, args.text, args.output);
            if args.no_clean {
                request.clean = false;
            }
            Some(Request::Replace(request))
        }
        Commands::Clean(args) => Some(Request::Clean(controller.clean_request(args.text, args.output))),
        Commands::Open(args) => open_request(&controller, args)?,
        Commands::Completions { .. } => None,
    };

    match request {
        Some(request) => {
            debug!("Executing {:?}", request);
            let status = controller.execute(request)?;
            println!("{}", status);
        }
        None => info!("Nothing to do"),
    }

    Ok(())
}

// Load the config file when present, then apply command line overrides
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        Config::load(config_path)?
    } else {
        debug!("Config file not found at '{}', using defaults.", config_path);
        Config::default()
    };

    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    Ok(config)
}

// Resolve an `open` selection into a request, answering the prompts from flags or stdin
fn open_request(controller: &Controller, args: OpenArgs) -> Result<Option<Request>> {
    let plan = DropPlan::from_paths(&args.files)?;
    debug!("Drop plan: {:?}", plan);

    let request = match plan {
        DropPlan::CleanText { text } => Some(Request::Clean(controller.clean_request(text, None))),
        DropPlan::ChooseCaptionAction { caption } => {
            let action = match caption_action_from_flags(args.action, args.with_text)? {
                Some(action) => action,
                None => choose_caption_action(&mut io::stdin().lock(), &caption)?,
            };
            Some(controller.caption_action_request(caption, action))
        }
        DropPlan::ConfirmReplace { caption, text } => {
            let question = format!(
                "Replace the text of {} with cleaned {}?",
                caption.display(),
                text.display()
            );
            if args.yes || confirm(&mut io::stdin().lock(), &question)? {
                Some(controller.confirmed_replace_request(caption, text))
            } else {
                info!("Replacement cancelled");
                None
            }
        }
    };

    Ok(request)
}

// Action given on the command line for a lone caption file; `None` when the user must be asked
fn caption_action_from_flags(
    action: Option<CliCaptionAction>,
    with_text: Option<PathBuf>,
) -> Result<Option<CaptionAction>> {
    match (action, with_text) {
        (Some(CliCaptionAction::Extract), Some(text)) => Err(anyhow!(
            "--with {} cannot be combined with --action extract",
            text.display()
        )),
        (Some(CliCaptionAction::Extract), None) => Ok(Some(CaptionAction::Extract)),
        (Some(CliCaptionAction::Replace), None) => {
            Err(anyhow!("--with <TEXT_FILE> is required to replace caption text"))
        }
        (Some(CliCaptionAction::Replace), Some(text)) | (None, Some(text)) => {
            Ok(Some(CaptionAction::Replace { text }))
        }
        (None, None) => Ok(None),
    }
}

// Ask whether to extract or replace, and for the text file when replacing
fn choose_caption_action<R: BufRead>(input: &mut R, caption: &Path) -> Result<CaptionAction> {
    let question = format!("Extract text from {} or replace it? [e/r]", caption.display());
    let answer = ask(input, &question)?;

    match answer.to_lowercase().as_str() {
        "e" | "extract" => Ok(CaptionAction::Extract),
        "r" | "replace" => {
            let text = ask(input, "Text file with the replacement lines:")?;
            if text.is_empty() {
                return Err(anyhow!("No text file given for the replacement"));
            }
            Ok(CaptionAction::Replace {
                text: PathBuf::from(text),
            })
        }
        other => Err(anyhow!("Unrecognized choice '{}': expected e or r", other)),
    }
}

// Ask a yes/no question; anything but y/yes is a no
fn confirm<R: BufRead>(input: &mut R, question: &str) -> Result<bool> {
    let answer = ask(input, &format!("{} [y/N]", question))?;
    Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes"))
}

// Write the question to stderr and read one trimmed answer line
fn ask<R: BufRead>(input: &mut R, question: &str) -> Result<String> {
    let mut stderr = io::stderr();
    write!(stderr, "{} ", question)?;
    stderr.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("Failed to read answer from stdin")?;

    Ok(answer.trim().to_string())
}
