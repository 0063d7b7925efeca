/*!
 * Tests for the reference resolver
 */

use myasub::reference;

use crate::common;

/// Exact map determinism: repeated original text maps to the translation
/// of the last occurrence processed.
#[test]
fn test_exactMap_withRepeatedLine_shouldKeepLastTranslation() {
    let original = common::simple_track(&[
        "Previously on the show",
        "Unrelated dialogue",
        "Previously on the show",
    ]);
    let translated = common::simple_track(&["early version", "other", "late version"]);

    let map = reference::build_exact_map(&original, &translated);

    assert_eq!(map.get("Previously on the show").unwrap(), "late version");
}

#[test]
fn test_exactMap_positionalPairing_survivesDisagreeingIds() {
    // The exact map pairs by position only; wildly different numbering on
    // the reference side must not matter.
    let original = common::srt_track(&[(1, "00:00:01,000", "Hello"), (2, "00:00:02,000", "Bye")]);
    let translated =
        common::srt_track(&[(50, "00:00:01,000", "T-hello"), (60, "00:00:02,000", "T-bye")]);

    let map = reference::build_exact_map(&original, &translated);

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("Hello").unwrap(), "T-hello");
}

/// Style example caps: never more than 40 items, and after 20 items the
/// long-line rule stops applying so only proper-noun lines get in.
#[test]
fn test_styleExamples_capInteraction_softCapThenProperNounOnly() {
    // 30 long plain lines followed by 30 proper-noun lines.
    let mut lines: Vec<String> = (0..30)
        .map(|i| format!("a long plain line of ordinary dialogue number {:02}", i))
        .collect();
    lines.extend((0..30).map(|i| format!("and then Maria said number {:02}", i)));
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let original = common::simple_track(&refs);
    let translated = common::simple_track(&refs);

    let examples = reference::extract_style_examples(&original, &translated);

    // 20 plain lines admitted under the soft cap, then proper-noun lines
    // until the hard cap of 40.
    assert_eq!(examples.len(), 40);
    let plain = examples
        .iter()
        .filter(|e| e.original.contains("plain line"))
        .count();
    assert_eq!(plain, 20);
}

#[test]
fn test_styleExamples_orderFollowsSourceOrder() {
    let original = common::simple_track(&[
        "we visited Paris together last summer",
        "and then Maria laughed",
        "finally Anna went home",
    ]);
    let translated = common::simple_track(&["t-one", "t-two", "t-three"]);

    let examples = reference::extract_style_examples(&original, &translated);

    assert_eq!(examples.len(), 3);
    assert!(examples[0].original.contains("Paris"));
    assert!(examples[1].original.contains("Maria"));
    assert!(examples[2].original.contains("Anna"));
}

#[test]
fn test_styleExamples_useIdAwareAlignment_notPositionalPairing() {
    // The tracks disagree on numbering but share ids; style extraction
    // must follow the id-aware alignment, pairing cue 2 with cue 2.
    let original = common::srt_track(&[
        (1, "00:00:01,000", "say hello to Maria"),
        (2, "00:00:03,000", "say goodbye to Anna"),
    ]);
    let translated = common::srt_track(&[
        (2, "00:00:03,000", "T-goodbye"),
        (1, "00:00:01,000", "T-hello"),
    ]);

    let examples = reference::extract_style_examples(&original, &translated);

    assert_eq!(examples.len(), 2);
    assert_eq!(examples[0].translated, "T-hello");
    assert_eq!(examples[1].translated, "T-goodbye");
}
