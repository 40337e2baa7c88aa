// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use podsrt::app_config::{self, Config};
use podsrt::file_utils::FileManager;
use podsrt::Controller;

/// Configuration picked up from the working directory when present
const LOCAL_CONFIG_FILE: &str = "podsrt.json";

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for podsrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// podsrt - podcast transcript to speaker-labelled SRT
///
/// Reads a transcript of timestamp markers and spoken text, attributes
/// every segment to a speaker and writes an SRT subtitle file.
#[derive(Parser, Debug)]
#[command(name = "podsrt")]
#[command(version)]
#[command(about = "Podcast transcript to speaker-labelled SRT converter")]
#[command(long_about = "podsrt turns a timestamped podcast transcript into SRT subtitles labelled with speaker names.

EXAMPLES:
    podsrt                                  # transcribe.md -> transcribe.srt
    podsrt episode.md episode.srt           # Explicit input and output
    podsrt -c rules.json episode.md         # Use a custom speaker table
    podsrt --log-level debug                # Show how each segment was attributed
    podsrt completions bash > podsrt.bash   # Generate bash completions

CONFIGURATION:
    Settings and the speaker rule table are read from the file given with
    --config, or from podsrt.json in the working directory when it exists.
    Without either, the built-in defaults are used.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Transcript to convert (default: transcribe.md)
    #[arg(value_name = "INPUT")]
    input_path: Option<PathBuf>,

    /// Subtitle file to write (default: transcribe.srt)
    #[arg(value_name = "OUTPUT")]
    output_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    config_path: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum)]
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
        // Records are filtered by log::max_level, which is raised or lowered later
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour prefix for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info by default; the config or CLI may change it once loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "podsrt", &mut std::io::stdout());
        return Ok(());
    }

    run_convert(cli)
}

fn load_config(options: &CommandLineOptions) -> Result<Config> {
    let mut config = match &options.config_path {
        Some(path) => Config::from_file(path)?,
        None if FileManager::file_exists(LOCAL_CONFIG_FILE) => Config::from_file(LOCAL_CONFIG_FILE)?,
        None => Config::default(),
    };

    // Override config with CLI options if provided
    if let Some(input) = &options.input_path {
        config.input_file = input.to_string_lossy().into_owned();
    }

    if let Some(output) = &options.output_path {
        config.output_file = output.to_string_lossy().into_owned();
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn run_convert(options: CommandLineOptions) -> Result<()> {
    let config = load_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;
    let config = controller.config();

    println!("🎙️  Processing podcast transcript...");
    println!("📄 Input file: {}", config.input_file);
    println!("💾 Output file: {}\n", config.output_file);

    let stats = controller
        .run_default()
        .with_context(|| format!("Failed to convert {}", config.input_file))?;

    println!("✅ SRT file generated: {}", config.output_file);
    println!("{}", stats);
    println!("✨ Done!");

    Ok(())
}
