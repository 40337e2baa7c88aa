/*!
 * Tests for rule-based speaker attribution
 */

use podsrt::segmenter::RawSegment;
use podsrt::speakers::{Speaker, SpeakerRule, SpeakerRules};
use crate::common::{late_segment, speaker};

/// The opening rule wins over strong keyword evidence
#[test]
fn test_classify_withOpeningOrdinal_shouldIgnoreKeywords() {
    let rules = SpeakerRules::default();
    let segment = RawSegment::new(1, 0, "Sou o Wagner Maranhão, diretor jurídico e advogado");

    assert_eq!(rules.classify(&segment), Some(speaker("Gabriel Tintor")));
}

#[test]
fn test_classify_withOrdinalAtThreshold_shouldStillUseOpeningRule() {
    let rules = SpeakerRules::default();
    assert_eq!(rules.classify(&RawSegment::new(71, 0, "santander")), Some(speaker("Gabriel Tintor")));
    assert_eq!(rules.classify(&RawSegment::new(72, 0, "santander")), Some(speaker("Douglas")));
}

#[test]
fn test_classify_withWindowPhraseInsideWindow_shouldPickWindowSpeaker() {
    let rules = SpeakerRules::default();

    for secs in [341, 380, 420] {
        let segment = late_segment(secs, "Os vídeos que VIRALIZAM são sobre educação financeira");
        assert_eq!(rules.classify(&segment), Some(speaker("Caio Milfon")), "at {}s", secs);
    }
}

/// Outside the window the phrase means nothing
#[test]
fn test_classify_withWindowPhraseOutsideWindow_shouldNotFire() {
    let rules = SpeakerRules::default();

    assert_eq!(rules.classify(&late_segment(500, "isso viraliza, coisas na internet")), None);
    assert_eq!(rules.classify(&late_segment(340, "coisas na internet")), None);
    assert_eq!(rules.classify(&late_segment(421, "coisas na internet")), None);
}

/// The window rule precedes keyword rules for other speakers
#[test]
fn test_classify_withWindowAndKeywordMatch_shouldPreferWindow() {
    let rules = SpeakerRules::default();
    let segment = late_segment(400, "o Douglas falou de educação financeira");

    assert_eq!(rules.classify(&segment), Some(speaker("Caio Milfon")));
}

#[test]
fn test_classify_withEachSpeakerKeyword_shouldPickThatSpeaker() {
    let rules = SpeakerRules::default();
    let cases = [
        ("Sou fundador e CEO da casa", "Gabriel Tintor"),
        ("Sou Radialista também", "Wagner Maranhão"),
        ("Trabalhei como auditor", "Douglas"),
        ("Sou gestor de patrimônio", "Jairo"),
        ("Fui agente de aeroporto", "Caio Milfon"),
    ];

    for (text, expected) in cases {
        assert_eq!(rules.classify(&late_segment(900, text)), Some(speaker(expected)), "{}", text);
    }
}

/// Ties across speakers go to the earlier rule
#[test]
fn test_classify_withSeveralSpeakersMentioned_shouldPickFirstRule() {
    let rules = SpeakerRules::default();
    let segment = late_segment(900, "o Jairo e o Douglas, nosso diretor financeiro");

    assert_eq!(rules.classify(&segment), Some(speaker("Douglas")));
}

#[test]
fn test_classify_withNoMatch_shouldReturnNone() {
    let rules = SpeakerRules::default();
    assert_eq!(rules.classify(&late_segment(900, "concordo totalmente")), None);
}

#[test]
fn test_matching_rule_withKeywordMatch_shouldReportIndex() {
    let rules = SpeakerRules::default();
    let (index, rule) = rules.matching_rule(&late_segment(900, "Santander")).unwrap();

    assert_eq!(index, 4);
    assert_eq!(rule.speaker(), &speaker("Douglas"));
}

#[test]
fn test_resolve_withUnresolvedSegment_shouldKeepPrevious() {
    let rules = SpeakerRules::default();
    let previous = speaker("Jairo");

    assert_eq!(rules.resolve(&late_segment(900, "pois é"), &previous), previous);
    assert_eq!(rules.resolve(&late_segment(900, "o totem"), &previous), speaker("Caio Milfon"));
}

/// Unresolved segments inherit the last resolved speaker, not the last rule hit
#[test]
fn test_attribute_withUnresolvedRun_shouldCarrySpeakerForward() {
    let rules = SpeakerRules::default();
    let segments = vec![
        RawSegment::new(72, 100, "sou advogado"),
        RawSegment::new(73, 110, "então"),
        RawSegment::new(74, 120, "bom"),
        RawSegment::new(75, 130, "meu tempo no santander"),
        RawSegment::new(76, 140, "enfim"),
    ];

    let names: Vec<String> = rules
        .attribute(segments)
        .into_iter()
        .map(|c| c.speaker.to_string())
        .collect();

    assert_eq!(names, vec!["Wagner Maranhão", "Wagner Maranhão", "Wagner Maranhão", "Douglas", "Douglas"]);
}

/// Without an opening rule, an unresolved first segment gets the default speaker
#[test]
fn test_attribute_withUnresolvedFirstSegment_shouldUseDefaultSpeaker() {
    let rules = SpeakerRules {
        default_speaker: speaker("Host"),
        rules: vec![SpeakerRule::Keywords {
            phrases: vec!["guest".to_string()],
            speaker: speaker("Guest"),
        }],
    };

    let classified = rules.attribute(vec![
        RawSegment::new(1, 0, "welcome"),
        RawSegment::new(2, 5, "thanks, I'm the guest"),
        RawSegment::new(3, 9, "great"),
    ]);

    let names: Vec<&str> = classified.iter().map(|c| c.speaker.name()).collect();
    assert_eq!(names, vec!["Host", "Guest", "Guest"]);
}

/// Phrases in the table match regardless of their case
#[test]
fn test_classify_withUppercasePhrase_shouldMatchLoweredText() {
    let rules = SpeakerRules {
        default_speaker: speaker("Host"),
        rules: vec![SpeakerRule::Keywords {
            phrases: vec!["Reino Capital".to_string()],
            speaker: speaker("Host"),
        }],
    };

    assert_eq!(rules.classify(&late_segment(0, "a REINO CAPITAL")), Some(speaker("Host")));
}

#[test]
fn test_validate_withDefaultTable_shouldPass() {
    assert!(SpeakerRules::default().validate().is_ok());
}

#[test]
fn test_validate_withBrokenRules_shouldFail() {
    let mut rules = SpeakerRules::default();
    rules.rules.push(SpeakerRule::Keywords { phrases: Vec::new(), speaker: speaker("Nobody") });
    assert!(rules.validate().is_err());

    let mut rules = SpeakerRules::default();
    rules.rules.push(SpeakerRule::TimeWindow {
        from_secs: 50,
        to_secs: 10,
        phrases: vec!["x".to_string()],
        speaker: speaker("Someone"),
    });
    assert!(rules.validate().is_err());

    let mut rules = SpeakerRules::default();
    rules.default_speaker = Speaker::new("  ");
    assert!(rules.validate().is_err());
}

/// Blank phrases would match every segment and hide later rules
#[test]
fn test_validate_withBlankPhrase_shouldFail() {
    let mut rules = SpeakerRules::default();
    rules.rules.insert(2, SpeakerRule::Keywords {
        phrases: vec!["jairo".to_string(), "".to_string()],
        speaker: speaker("Jairo"),
    });
    let err = rules.validate().unwrap_err();
    assert!(err.to_string().contains("rule 3 has a blank phrase at position 2"));

    let mut rules = SpeakerRules::default();
    rules.rules.push(SpeakerRule::TimeWindow {
        from_secs: 0,
        to_secs: 10,
        phrases: vec!["   ".to_string()],
        speaker: speaker("Someone"),
    });
    assert!(rules.validate().is_err());
}

#[test]
fn test_rules_withJsonRoundTrip_shouldKeepOrder() {
    let rules = SpeakerRules::default();
    let json = serde_json::to_string(&rules).unwrap();
    assert!(json.contains("\"rule\":\"opening\""));
    assert!(json.contains("\"rule\":\"time_window\""));

    let parsed: SpeakerRules = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, rules);
}
