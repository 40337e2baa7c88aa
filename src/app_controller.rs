use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::path::Path;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::segmenter::Segmenter;
use crate::stats::TranscriptStats;
use crate::subtitle_processor::SubtitleCollection;

// @module: Application controller for transcript conversion

/// Runs the segment -> attribute -> assemble pipeline
pub struct Controller {
    // @field: App configuration
    config: Config,

    // @field: Segmenter built from the configured header lines
    segmenter: Segmenter,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;

        let segmenter = Segmenter::new(config.header_lines.clone());
        Ok(Self { config, segmenter })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Convert transcript lines to subtitles entirely in memory
    pub fn convert_lines<S: AsRef<str>>(&self, lines: &[S]) -> SubtitleCollection {
        let segments = self.segmenter.segment(lines);
        debug!("Segmented {} line(s) into {} segment(s)", lines.len(), segments.len());

        let classified = self.config.speakers.attribute(segments);
        SubtitleCollection::assemble(classified, self.config.default_span_secs)
    }

    /// Read `input_file`, write the subtitles to `output_file` and return the stats.
    ///
    /// Nothing is written when the input cannot be read.
    pub fn run(&self, input_file: &Path, output_file: &Path) -> Result<TranscriptStats> {
        let start_time = Instant::now();

        let lines = FileManager::read_lines(input_file)?;
        info!("Read {} line(s) from {:?}", lines.len(), input_file);

        let subtitles = self.convert_lines(&lines);
        if subtitles.is_empty() {
            warn!("No timestamped segments found in {:?}, writing an empty subtitle file", input_file);
        }

        subtitles.write_to_srt(output_file)?;

        let stats = TranscriptStats::from_subtitles(&subtitles);
        info!(
            "Wrote {} subtitle(s) to {:?} in {}",
            stats.subtitle_count,
            output_file,
            Self::format_duration(start_time.elapsed())
        );

        Ok(stats)
    }

    /// Run with the input and output named in the configuration
    pub fn run_default(&self) -> Result<TranscriptStats> {
        let input = self.config.input_file.clone();
        let output = self.config.output_file.clone();
        self.run(Path::new(&input), Path::new(&output))
    }

    /// Format a duration in a human-readable form
    fn format_duration(duration: Duration) -> String {
        let millis = duration.as_millis();
        if millis < 1000 {
            format!("{}ms", millis)
        } else {
            format!("{:.2}s", duration.as_secs_f64())
        }
    }
}
