/*!
 * Line segmentation of raw transcripts.
 *
 * A transcript alternates timestamp markers with runs of spoken text. Every
 * run of text lines between two markers (or after the last one) becomes one
 * [`RawSegment`] tagged with the marker that opened it.
 */

use log::{debug, warn};

use crate::timestamp::{is_timestamp_line, parse_timestamp};

/// Header lines the transcript export puts above the content
pub const DEFAULT_HEADER_LINES: [&str; 2] = ["Transcrição", "Pesquisar transcrição"];

// @struct: Finalized run of text under one timestamp marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    // @field: 1-based position among finalized segments
    pub ordinal: usize,

    // @field: Opening marker in seconds
    pub start_secs: u64,

    // @field: Text lines joined with single spaces
    pub text: String,
}

impl RawSegment {
    pub fn new(ordinal: usize, start_secs: u64, text: impl Into<String>) -> Self {
        Self {
            ordinal,
            start_secs,
            text: text.into(),
        }
    }
}

/// Splits transcript lines into [`RawSegment`]s.
#[derive(Debug, Clone)]
pub struct Segmenter {
    header_lines: Vec<String>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(DEFAULT_HEADER_LINES.iter().map(|h| h.to_string()).collect())
    }
}

impl Segmenter {
    /// Create a segmenter that skips the given header lines
    pub fn new(header_lines: Vec<String>) -> Self {
        Self { header_lines }
    }

    fn is_header(&self, line: &str) -> bool {
        self.header_lines.iter().any(|h| h == line)
    }

    /// Segment the transcript lines in input order.
    ///
    /// Text seen before the first marker is discarded, and a marker followed
    /// directly by another marker produces no segment.
    pub fn segment<S: AsRef<str>>(&self, lines: &[S]) -> Vec<RawSegment> {
        let mut segments = Vec::new();
        let mut current_start: Option<u64> = None;
        let mut pending: Vec<&str> = Vec::new();
        let mut orphan_lines = 0usize;

        for raw in lines {
            let line = raw.as_ref().trim();
            if line.is_empty() || self.is_header(line) {
                continue;
            }

            if is_timestamp_line(line) {
                if let Some(start) = current_start {
                    Self::finalize(&mut segments, start, &mut pending);
                }
                current_start = Some(parse_timestamp(line));
            } else if current_start.is_some() {
                pending.push(line);
            } else {
                orphan_lines += 1;
            }
        }

        if let Some(start) = current_start {
            Self::finalize(&mut segments, start, &mut pending);
        }

        if orphan_lines > 0 {
            warn!("Discarded {} text line(s) found before the first timestamp", orphan_lines);
        }

        segments
    }

    // Pushes the pending run as the next segment; no-op when nothing is pending
    fn finalize(segments: &mut Vec<RawSegment>, start_secs: u64, pending: &mut Vec<&str>) {
        if pending.is_empty() {
            return;
        }

        let segment = RawSegment::new(segments.len() + 1, start_secs, pending.join(" "));
        debug!("Segment {} at {}s: {} chars", segment.ordinal, segment.start_secs, segment.text.len());
        segments.push(segment);
        pending.clear();
    }
}

/// Segment with the default header lines
pub fn segment_lines<S: AsRef<str>>(lines: &[S]) -> Vec<RawSegment> {
    Segmenter::default().segment(lines)
}
