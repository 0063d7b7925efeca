/*!
 * Common test utilities and fixtures for the myasub test suite
 */

use std::sync::Once;

use myasub::srt::SubtitleBlock;
use myasub::store::ProjectRecord;

static INIT_LOGGING: Once = Once::new();

/// Install the env_logger backend once for the whole test binary, so debug
/// output from silently-dropped cues and store operations is visible when a
/// test fails.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Build an SRT track from (seq_num, start, text) triples. End times are
/// derived from the start for brevity; the codec treats both as opaque.
pub fn srt_track(cues: &[(u32, &str, &str)]) -> String {
    cues.iter()
        .map(|(seq_num, start, text)| format!("{}\n{} --> {}\n{}", seq_num, start, start, text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build an SRT track with sequential ids and second-spaced timestamps.
pub fn simple_track(lines: &[&str]) -> String {
    lines
        .iter()
        .enumerate()
        .map(|(i, text)| {
            format!(
                "{}\n00:00:{:02},000 --> 00:00:{:02},900\n{}",
                i + 1,
                i + 1,
                i + 1,
                text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build a stored project from (source, Option<target>) pairs.
pub fn project_from_pairs(
    file_name: &str,
    pairs: &[(&str, Option<&str>)],
    is_external_import: bool,
) -> ProjectRecord {
    let cues = pairs
        .iter()
        .enumerate()
        .map(|(i, (source, target))| SubtitleBlock {
            seq_num: i as u32 + 1,
            start: format!("00:00:{:02},000", i + 1),
            end: format!("00:00:{:02},900", i + 1),
            source: source.to_string(),
            target: target.map(str::to_string),
            from_reference: false,
        })
        .collect();
    ProjectRecord::new(file_name, cues, is_external_import)
}
