/*!
 * Tests for transcript line segmentation
 */

use podsrt::segmenter::{RawSegment, Segmenter, segment_lines};

/// Consecutive text lines join with single spaces under their marker
#[test]
fn test_segment_lines_withMultilineRuns_shouldJoinText() {
    let lines = ["0:00", "Olá pessoal", "tudo bem?", "0:05", "Eu sou engenheiro"];
    let segments = segment_lines(&lines);

    assert_eq!(segments, vec![
        RawSegment::new(1, 0, "Olá pessoal tudo bem?"),
        RawSegment::new(2, 5, "Eu sou engenheiro"),
    ]);
}

#[test]
fn test_segment_lines_withHeadersAndBlanks_shouldSkipThem() {
    let lines = ["Transcrição", "", "Pesquisar transcrição", "  0:10  ", "   fala   ", "", "Transcrição"];
    let segments = segment_lines(&lines);

    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].start_secs, 10);
    assert_eq!(segments[0].text, "fala");
}

/// Text before the first marker has no segment to belong to
#[test]
fn test_segment_lines_withTextBeforeFirstMarker_shouldDiscardIt() {
    let lines = ["introdução perdida", "0:03", "primeira fala"];
    let segments = segment_lines(&lines);

    assert_eq!(segments, vec![RawSegment::new(1, 3, "primeira fala")]);
}

/// A marker directly followed by another marker yields no segment
#[test]
fn test_segment_lines_withAdjacentMarkers_shouldSkipEmptyMarker() {
    let lines = ["0:00", "a", "0:05", "0:09", "b", "0:12"];
    let segments = segment_lines(&lines);

    assert_eq!(segments, vec![
        RawSegment::new(1, 0, "a"),
        RawSegment::new(2, 9, "b"),
    ]);
}

#[test]
fn test_segment_lines_withOnlyHeaders_shouldReturnNothing() {
    let lines = ["Transcrição", "", "Pesquisar transcrição", "   "];
    assert!(segment_lines(&lines).is_empty());
}

#[test]
fn test_segment_lines_withNoText_shouldReturnNothing() {
    let empty: [&str; 0] = [];
    assert!(segment_lines(&empty).is_empty());
    assert!(segment_lines(&["0:00", "0:05"]).is_empty());
}

/// Ordinals count finalized segments, not markers
#[test]
fn test_segment_lines_withSkippedMarkers_shouldNumberSequentially() {
    let lines = ["0:00", "0:01", "um", "0:02", "0:03", "dois", "0:04", "três"];
    let ordinals: Vec<usize> = segment_lines(&lines).iter().map(|s| s.ordinal).collect();
    assert_eq!(ordinals, vec![1, 2, 3]);
}

#[test]
fn test_segmenter_withCustomHeaders_shouldSkipOnlyThose() {
    let segmenter = Segmenter::new(vec!["Transcript".to_string()]);
    let lines = ["Transcript", "0:00", "Transcrição", "hello"];
    let segments = segmenter.segment(&lines);

    assert_eq!(segments, vec![RawSegment::new(1, 0, "Transcrição hello")]);
}

/// Lines that only look like markers stay text
#[test]
fn test_segment_lines_withMarkerLikeText_shouldKeepAsText() {
    let lines = ["0:00", "123:45", "às 10:00"];
    let segments = segment_lines(&lines);

    assert_eq!(segments, vec![RawSegment::new(1, 0, "123:45 às 10:00")]);
}
