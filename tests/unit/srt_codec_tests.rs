/*!
 * Tests for the SRT codec
 */

use myasub::srt;

use crate::common;

/// The end-to-end scenario from the product requirements: parse two cues,
/// serialize immediately, get the input back byte for byte.
#[test]
fn test_codec_endToEnd_parseThenSerialize_shouldReproduceInput() {
    let input = "1\n00:00:01,000 --> 00:00:02,000\nHello World\n\n2\n00:00:03,000 --> 00:00:04,000\nGoodbye";

    let cues = srt::parse(input);
    assert_eq!(cues.len(), 2);

    assert_eq!(srt::serialize(&cues), input);
}

#[test]
fn test_codec_roundTrip_withMultiLineAndSparseIds_shouldPreserveEverything() {
    let input = common::srt_track(&[
        (3, "00:01:00,500", "Line one\nLine two"),
        (9, "00:01:05,000", "Single line"),
        (4, "00:01:10,250", "Ids are not contiguous"),
    ]);

    let first = srt::parse(&input);
    let second = srt::parse(&srt::serialize(&first));

    assert_eq!(first, second);
    assert_eq!(first[0].seq_num, 3);
    assert_eq!(first[2].seq_num, 4);
}

#[test]
fn test_codec_parse_withMixedGoodAndBadBlocks_shouldKeepOnlyGoodOnes() {
    common::init_test_logging();
    let input = "garbage header\n\n1\n00:00:01,000 --> 00:00:02,000\nGood cue\n\nnot-a-number\n00:00:03,000 --> 00:00:04,000\nBad id\n\n3\nno arrow here\nBad timing\n\n4\n00:00:07,000 --> 00:00:08,000\nAnother good cue";

    let cues = srt::parse(input);

    assert_eq!(cues.len(), 2);
    assert_eq!(cues[0].text, "Good cue");
    assert_eq!(cues[1].text, "Another good cue");
}

#[test]
fn test_codec_parse_withWindowsAndOldMacLineEndings_shouldBehaveIdentically() {
    let unix = common::simple_track(&["Hello", "World"]);
    let windows = unix.replace('\n', "\r\n");
    let old_mac = unix.replace('\n', "\r");

    assert_eq!(srt::parse(&unix), srt::parse(&windows));
    assert_eq!(srt::parse(&unix), srt::parse(&old_mac));
}

#[test]
fn test_codec_parse_withLeadingAndTrailingBlankLines_shouldIgnoreThem() {
    let input = format!("\n\n\n{}\n\n\n", common::simple_track(&["Hello"]));
    let cues = srt::parse(&input);

    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].text, "Hello");
}

#[test]
fn test_codec_serializeBlocks_mixedTranslationState_shouldSubstitutePerBlock() {
    let mut blocks = srt::parse_blocks(&common::simple_track(&["Hello", "World"]));
    blocks[1].target = Some("ကမ္ဘာကြီး".to_string());

    let output = srt::serialize_blocks(&blocks);

    assert!(output.contains("Hello"));
    assert!(!output.contains("World"));
    assert!(output.contains("ကမ္ဘာကြီး"));
}
