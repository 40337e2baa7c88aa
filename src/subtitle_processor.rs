use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::TranscriptError;
use crate::file_utils::FileManager;
use crate::speakers::{ClassifiedSegment, Speaker};
use crate::timestamp::format_srt_time;

// @module: Subtitle assembly, SRT rendering and read-back

/// Span given to a subtitle with no successor
pub const DEFAULT_SPAN_SECS: u64 = 5;

// @const: SRT time range regex
static TIME_RANGE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2,}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2,}):(\d{2}):(\d{2}),(\d{3})$").unwrap()
});

// @const: Leading `[Speaker]:` label
static SPEAKER_LABEL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^\[([^\]]+)\]:(.*)$").unwrap()
});

// @struct: Single timed, speaker-labelled subtitle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtitle {
    // @field: 1-based sequence number
    pub seq_num: usize,

    // @field: Start time in seconds
    pub start_secs: u64,

    // @field: End time in seconds
    pub end_secs: u64,

    // @field: Attributed speaker, absent only for unlabelled read-back blocks
    pub speaker: Option<Speaker>,

    // @field: Spoken text without the label
    pub text: String,
}

impl Subtitle {
    pub fn new(seq_num: usize, start_secs: u64, end_secs: u64, speaker: Option<Speaker>, text: String) -> Self {
        Subtitle {
            seq_num,
            start_secs,
            end_secs,
            speaker,
            text,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_srt_time(self.start_secs)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_srt_time(self.end_secs)
    }

    /// Text line as written to the file: `[Speaker]: text`
    pub fn display_text(&self) -> String {
        match &self.speaker {
            Some(speaker) => format!("[{}]: {}", speaker, self.text),
            None => self.text.clone(),
        }
    }

    pub fn duration_secs(&self) -> u64 {
        self.end_secs.saturating_sub(self.start_secs)
    }
}

impl fmt::Display for Subtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.seq_num)?;
        writeln!(f, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        writeln!(f, "{}", self.display_text())?;
        writeln!(f)
    }
}

/// Ordered list of subtitles in input order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleCollection {
    /// List of subtitle entries
    pub entries: Vec<Subtitle>,
}

impl SubtitleCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Build subtitles from classified segments.
    ///
    /// Every subtitle ends where the next one starts; the last one ends
    /// `default_span_secs` after its start, clamped at `u64::MAX`.
    pub fn assemble(classified: Vec<ClassifiedSegment>, default_span_secs: u64) -> Self {
        let mut entries: Vec<Subtitle> = classified
            .into_iter()
            .enumerate()
            .map(|(index, ClassifiedSegment { segment, speaker })| {
                Subtitle::new(
                    index + 1,
                    segment.start_secs,
                    segment.start_secs.saturating_add(default_span_secs),
                    Some(speaker),
                    segment.text,
                )
            })
            .collect();

        for i in 1..entries.len() {
            entries[i - 1].end_secs = entries[i].start_secs;
        }

        debug!("Assembled {} subtitle(s)", entries.len());
        SubtitleCollection { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// End of the last subtitle, 0 when empty
    pub fn total_duration_secs(&self) -> u64 {
        self.entries.last().map_or(0, |entry| entry.end_secs)
    }

    /// Render the whole collection in SRT format
    pub fn to_srt_string(&self) -> String {
        self.entries.iter().map(|entry| entry.to_string()).collect()
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // Create parent directory if needed
        if let Some(parent) = path.parent() {
            FileManager::ensure_dir(parent)?;
        }

        let mut file = File::create(path)
            .with_context(|| format!("Failed to create subtitle file: {}", path.display()))?;

        for entry in &self.entries {
            write!(file, "{}", entry)
                .with_context(|| format!("Failed to write subtitle file: {}", path.display()))?;
        }

        file.flush()
            .with_context(|| format!("Failed to flush subtitle file: {}", path.display()))?;
        Ok(())
    }

    /// Parse speaker-labelled SRT content.
    ///
    /// Milliseconds are dropped since subtitles carry whole seconds. A block
    /// without a `[Speaker]:` label gets no speaker.
    pub fn parse_srt_string(content: &str) -> Result<Self, TranscriptError> {
        let mut entries = Vec::new();
        let mut block: Vec<&str> = Vec::new();
        let mut block_count = 0;

        for line in content.lines().chain(std::iter::once("")) {
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                block.push(trimmed);
                continue;
            }
            if block.is_empty() {
                continue;
            }

            block_count += 1;
            entries.push(Self::parse_block(block_count, &block)?);
            block.clear();
        }

        Ok(SubtitleCollection { entries })
    }

    fn parse_block(block_num: usize, lines: &[&str]) -> Result<Subtitle, TranscriptError> {
        let malformed = |message: String| TranscriptError::MalformedSubtitle {
            block: block_num,
            message,
        };

        let seq_num = lines[0]
            .parse::<usize>()
            .map_err(|_| malformed(format!("invalid sequence number '{}'", lines[0])))?;

        let range = lines
            .get(1)
            .ok_or_else(|| malformed("missing time range".to_string()))?;
        let caps = TIME_RANGE_REGEX
            .captures(range)
            .ok_or_else(|| malformed(format!("invalid time range '{}'", range)))?;
        let start_secs = Self::captured_secs(&caps, 1).ok_or_else(|| malformed("start time overflow".to_string()))?;
        let end_secs = Self::captured_secs(&caps, 5).ok_or_else(|| malformed("end time overflow".to_string()))?;

        let body = lines[2..].join("\n");
        if body.is_empty() {
            warn!("Subtitle block {} has no text", block_num);
        }

        let (speaker, text) = match SPEAKER_LABEL_REGEX.captures(&body) {
            Some(label) => (
                Some(Speaker::new(label[1].trim())),
                label[2].trim().to_string(),
            ),
            None => (None, body.clone()),
        };

        Ok(Subtitle::new(seq_num, start_secs, end_secs, speaker, text))
    }

    // Hours, minutes and seconds from captures starting at `first`
    fn captured_secs(caps: &regex::Captures, first: usize) -> Option<u64> {
        let hours: u64 = caps[first].parse().ok()?;
        let minutes: u64 = caps[first + 1].parse().ok()?;
        let seconds: u64 = caps[first + 2].parse().ok()?;
        hours.checked_mul(3600)?.checked_add(minutes * 60 + seconds)
    }

    /// Subtitle showing at `secs` (`start <= secs < end`)
    pub fn subtitle_at(&self, secs: u64) -> Option<&Subtitle> {
        self.entries
            .iter()
            .find(|entry| entry.start_secs <= secs && secs < entry.end_secs)
    }

    /// Distinct labelled speakers in order of first appearance
    pub fn speakers(&self) -> Vec<&Speaker> {
        let mut seen: Vec<&Speaker> = Vec::new();
        for speaker in self.entries.iter().filter_map(|entry| entry.speaker.as_ref()) {
            if !speaker.name().is_empty() && !seen.contains(&speaker) {
                seen.push(speaker);
            }
        }
        seen
    }
}
