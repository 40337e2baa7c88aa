/*!
 * Speaker attribution for transcript segments.
 *
 * Attribution runs an ordered table of [`SpeakerRule`]s against each
 * segment; the first rule that matches names the speaker:
 * - `Opening`: segments up to a fixed ordinal belong to the host, whatever they say
 * - `TimeWindow`: a phrase match inside a closed window of seconds
 * - `Keywords`: a phrase match anywhere, one rule per speaker
 *
 * Segments no rule claims keep the previously resolved speaker. The table is
 * plain data and can be replaced through the configuration file.
 */

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::TranscriptError;
use crate::segmenter::RawSegment;

/// Name of a known podcast speaker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Speaker(String);

impl Speaker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Speaker {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One row of the attribution table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum SpeakerRule {
    /// Every segment with `ordinal <= max_ordinal` belongs to `speaker`
    Opening { max_ordinal: usize, speaker: Speaker },

    /// A phrase match while `from_secs <= start <= to_secs`
    TimeWindow {
        from_secs: u64,
        to_secs: u64,
        phrases: Vec<String>,
        speaker: Speaker,
    },

    /// A phrase match at any position or time
    Keywords { phrases: Vec<String>, speaker: Speaker },
}

impl SpeakerRule {
    pub fn speaker(&self) -> &Speaker {
        match self {
            Self::Opening { speaker, .. }
            | Self::TimeWindow { speaker, .. }
            | Self::Keywords { speaker, .. } => speaker,
        }
    }

    /// `lowered` must be the lower-cased segment text
    pub fn matches(&self, segment: &RawSegment, lowered: &str) -> bool {
        match self {
            Self::Opening { max_ordinal, .. } => segment.ordinal <= *max_ordinal,
            Self::TimeWindow { from_secs, to_secs, phrases, .. } => {
                (*from_secs..=*to_secs).contains(&segment.start_secs) && contains_any(lowered, phrases)
            }
            Self::Keywords { phrases, .. } => contains_any(lowered, phrases),
        }
    }
}

fn contains_any(lowered: &str, phrases: &[String]) -> bool {
    phrases.iter().any(|phrase| lowered.contains(&phrase.to_lowercase()))
}

// @struct: Segment with its resolved speaker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedSegment {
    pub segment: RawSegment,
    pub speaker: Speaker,
}

/// Ordered attribution table plus the speaker assumed before any rule fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakerRules {
    /// Speaker for an unresolved first segment
    pub default_speaker: Speaker,

    /// Rules in precedence order
    pub rules: Vec<SpeakerRule>,
}

impl Default for SpeakerRules {
    fn default() -> Self {
        let host = Speaker::from("Gabriel Tintor");
        let keywords = |speaker: &str, phrases: &[&str]| SpeakerRule::Keywords {
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
            speaker: Speaker::from(speaker),
        };

        Self {
            default_speaker: host.clone(),
            rules: vec![
                SpeakerRule::Opening {
                    max_ordinal: 71,
                    speaker: host,
                },
                SpeakerRule::TimeWindow {
                    from_secs: 341,
                    to_secs: 420,
                    phrases: [
                        "viralizam",
                        "vídeo engraçado",
                        "educação financeira",
                        "experiência minha pessoal",
                        "coisas na internet",
                    ]
                    .iter()
                    .map(|p| p.to_string())
                    .collect(),
                    speaker: Speaker::from("Caio Milfon"),
                },
                keywords("Gabriel Tintor", &[
                    "gabriel tintor",
                    "fundador e ceo",
                    "reino capital",
                    "eu já tenho uma experiência de 8 anos",
                    "formada em engenheiria",
                    "trabalhava como engenheiro",
                ]),
                keywords("Wagner Maranhão", &[
                    "wagner maranhão",
                    "diretor jurídico",
                    "advogado",
                    "14 anos de de de for de formado",
                    "vavá",
                    "radialista",
                ]),
                keywords("Douglas", &[
                    "douglas",
                    "diretor financeiro",
                    "auditor",
                    "15 anos de experiência no mercado",
                    "santander",
                ]),
                keywords("Jairo", &[
                    "jairo",
                    "gestor de patrimônio",
                    "personal",
                    "muitos anos já de mercado financeiro",
                ]),
                keywords("Caio Milfon", &[
                    "caio milfon",
                    "diretor comercial",
                    "latan",
                    "agente de aeroporto",
                    "totem",
                ]),
            ],
        }
    }
}

impl SpeakerRules {
    /// First rule that claims the segment, with its table index
    pub fn matching_rule(&self, segment: &RawSegment) -> Option<(usize, &SpeakerRule)> {
        let lowered = segment.text.to_lowercase();
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(segment, &lowered))
    }

    /// Speaker named by the table, or `None` when no rule matches
    pub fn classify(&self, segment: &RawSegment) -> Option<Speaker> {
        self.matching_rule(segment).map(|(_, rule)| rule.speaker().clone())
    }

    /// Classify, falling back to `previous` for unresolved segments.
    ///
    /// The returned speaker is the accumulator for the next segment.
    pub fn resolve(&self, segment: &RawSegment, previous: &Speaker) -> Speaker {
        match self.matching_rule(segment) {
            Some((index, rule)) => {
                debug!("Segment {} -> {} (rule {})", segment.ordinal, rule.speaker(), index + 1);
                rule.speaker().clone()
            }
            None => {
                debug!("Segment {} unresolved, keeping {}", segment.ordinal, previous);
                previous.clone()
            }
        }
    }

    /// Attribute every segment in order, threading the last resolved speaker
    pub fn attribute(&self, segments: Vec<RawSegment>) -> Vec<ClassifiedSegment> {
        let mut previous = self.default_speaker.clone();
        segments
            .into_iter()
            .map(|segment| {
                let speaker = self.resolve(&segment, &previous);
                previous = speaker.clone();
                ClassifiedSegment { segment, speaker }
            })
            .collect()
    }

    /// Check the table for rows that could never match or name nobody
    pub fn validate(&self) -> Result<(), TranscriptError> {
        if self.default_speaker.name().trim().is_empty() {
            return Err(TranscriptError::Config("default speaker must not be empty".to_string()));
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let position = index + 1;
            if rule.speaker().name().trim().is_empty() {
                return Err(TranscriptError::Config(format!("rule {} has an empty speaker name", position)));
            }
            match rule {
                SpeakerRule::Opening { .. } => {}
                SpeakerRule::TimeWindow { from_secs, to_secs, phrases, .. } => {
                    if from_secs > to_secs {
                        return Err(TranscriptError::Config(format!(
                            "rule {} has a time window starting at {}s after its end at {}s",
                            position, from_secs, to_secs
                        )));
                    }
                    Self::validate_phrases(position, phrases)?;
                }
                SpeakerRule::Keywords { phrases, .. } => {
                    Self::validate_phrases(position, phrases)?;
                }
            }
        }

        Ok(())
    }

    // A blank phrase is a substring of every text and would claim every segment
    fn validate_phrases(position: usize, phrases: &[String]) -> Result<(), TranscriptError> {
        if phrases.is_empty() {
            return Err(TranscriptError::Config(format!("rule {} has no phrases", position)));
        }
        if let Some(index) = phrases.iter().position(|phrase| phrase.trim().is_empty()) {
            return Err(TranscriptError::Config(format!(
                "rule {} has a blank phrase at position {}",
                position,
                index + 1
            )));
        }
        Ok(())
    }
}
