/*!
 * Summary statistics over a generated subtitle list.
 */

use std::fmt;

use crate::speakers::Speaker;
use crate::subtitle_processor::SubtitleCollection;
use crate::timestamp::format_srt_time;

/// One speaker's share of the subtitles
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerShare {
    pub speaker: Speaker,
    pub count: usize,
    pub percentage: f64,
}

/// Totals reported after a conversion
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranscriptStats {
    /// Number of subtitles written
    pub subtitle_count: usize,

    /// End time of the last subtitle
    pub total_duration_secs: u64,

    /// Speaker distribution, most frequent first
    pub distribution: Vec<SpeakerShare>,
}

impl TranscriptStats {
    /// Count subtitles per speaker.
    ///
    /// Speakers with equal counts stay in order of first appearance.
    pub fn from_subtitles(collection: &SubtitleCollection) -> Self {
        let mut counts: Vec<(Speaker, usize)> = Vec::new();
        for speaker in collection.entries.iter().filter_map(|entry| entry.speaker.as_ref()) {
            match counts.iter_mut().find(|(known, _)| known == speaker) {
                Some((_, count)) => *count += 1,
                None => counts.push((speaker.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        let total = collection.len();
        let distribution = counts
            .into_iter()
            .map(|(speaker, count)| SpeakerShare {
                speaker,
                count,
                percentage: if total == 0 { 0.0 } else { count as f64 * 100.0 / total as f64 },
            })
            .collect();

        TranscriptStats {
            subtitle_count: total,
            total_duration_secs: collection.total_duration_secs(),
            distribution,
        }
    }

    pub fn formatted_duration(&self) -> String {
        format_srt_time(self.total_duration_secs)
    }
}

impl fmt::Display for TranscriptStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total subtitles: {}", self.subtitle_count)?;
        writeln!(f, "Total duration: {}", self.formatted_duration())?;
        writeln!(f)?;
        writeln!(f, "Speaker distribution:")?;
        if self.distribution.is_empty() {
            writeln!(f, "   (no segments)")?;
        }
        for share in &self.distribution {
            writeln!(f, "   {}: {} segments ({:.1}%)", share.speaker, share.count, share.percentage)?;
        }
        Ok(())
    }
}
