use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::segmenter::DEFAULT_HEADER_LINES;
use crate::speakers::SpeakerRules;
use crate::subtitle_processor::DEFAULT_SPAN_SECS;

/// Application configuration module
/// This module handles loading and validating the settings of a conversion,
/// including the speaker attribution table.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Transcript to read
    #[serde(default = "default_input_file")]
    pub input_file: String,

    /// Subtitle file to write
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Lines skipped as export headers
    #[serde(default = "default_header_lines")]
    pub header_lines: Vec<String>,

    /// Span of the last subtitle, in seconds
    #[serde(default = "default_span_secs")]
    pub default_span_secs: u64,

    /// Speaker attribution table
    #[serde(default)]
    pub speakers: SpeakerRules,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
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

fn default_input_file() -> String {
    "transcribe.md".to_string()
}

fn default_output_file() -> String {
    "transcribe.srt".to_string()
}

fn default_header_lines() -> Vec<String> {
    DEFAULT_HEADER_LINES.iter().map(|h| h.to_string()).collect()
}

fn default_span_secs() -> u64 {
    DEFAULT_SPAN_SECS
}

impl Config {
    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.input_file.trim().is_empty() {
            return Err(anyhow!("Input file name must not be empty"));
        }

        if self.output_file.trim().is_empty() {
            return Err(anyhow!("Output file name must not be empty"));
        }

        if self.default_span_secs == 0 {
            return Err(anyhow!("default_span_secs must be greater than zero"));
        }

        self.speakers.validate()?;

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            input_file: default_input_file(),
            output_file: default_output_file(),
            header_lines: default_header_lines(),
            default_span_secs: default_span_secs(),
            speakers: SpeakerRules::default(),
            log_level: LogLevel::default(),
        }
    }
}
