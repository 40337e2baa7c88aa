/*!
 * # podsrt - podcast transcript to speaker-labelled subtitles
 *
 * Converts a plain-text podcast transcript (timestamp markers interleaved
 * with spoken text) into an SRT file whose lines are prefixed with the
 * speaker who said them.
 *
 * ## Architecture
 *
 * The pipeline runs strictly in sequence:
 * - `segmenter`: splits transcript lines into timestamped text segments
 * - `speakers`: attributes each segment to a speaker with an ordered rule table
 * - `subtitle_processor`: chains end times, renders and reads back SRT
 * - `stats`: subtitle count, duration and speaker distribution
 *
 * Supporting modules:
 * - `timestamp`: marker parsing and SRT time formatting
 * - `app_config`: JSON configuration, including the rule table
 * - `file_utils`: file system operations
 * - `app_controller`: wires the pipeline to input and output files
 * - `errors`: custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod segmenter;
pub mod speakers;
pub mod stats;
pub mod subtitle_processor;
pub mod timestamp;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{AppError, TranscriptError};
pub use segmenter::{RawSegment, Segmenter, segment_lines};
pub use speakers::{ClassifiedSegment, Speaker, SpeakerRule, SpeakerRules};
pub use stats::{SpeakerShare, TranscriptStats};
pub use subtitle_processor::{Subtitle, SubtitleCollection};
pub use timestamp::{format_srt_time, parse_timestamp};
