/*!
 * Track alignment: pairing cues from two independently parsed SRT tracks
 * that represent the same spoken lines.
 *
 * Real-world subtitle pairs for "the same" content often disagree on cue
 * numbering and cue counts. Alignment therefore matches by sequence number
 * first and only falls back to positional matching when the candidate at the
 * same index carries an identical start timestamp, which defends against
 * wholesale misalignment when ids are merely offset or missing.
 */

use std::collections::HashMap;

use log::debug;

use crate::srt::{self, Cue};

/// A cue paired with its counterpart from a second track.
///
/// Unlike [`crate::srt::SubtitleBlock`] this always carries both sides; the
/// aligner never emits a pair with a missing target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedCue {
    /// Sequence number of the original cue.
    pub seq_num: u32,
    /// Start timestamp of the original cue, verbatim.
    pub start: String,
    /// End timestamp of the original cue, verbatim.
    pub end: String,
    /// Text from the original track.
    pub source: String,
    /// Text from the second track, i.e. the translation.
    pub target: String,
}

/// Parse two raw SRT contents and align them.
pub fn align(original_content: &str, translated_content: &str) -> Vec<AlignedCue> {
    align_cues(&srt::parse(original_content), &srt::parse(translated_content))
}

/// Align two parsed tracks.
///
/// For each original cue, in original order:
/// 1. look the translated cue up by sequence number;
/// 2. failing that, take the translated cue at the same positional index,
///    but only if its start timestamp equals the original's;
/// 3. if neither matches, the original cue is dropped from the output.
///
/// Duplicate sequence numbers in the translated track resolve to the last
/// occurrence, consistent with the exact-map's last-writer-wins behavior.
pub fn align_cues(original: &[Cue], translated: &[Cue]) -> Vec<AlignedCue> {
    let by_seq: HashMap<u32, &Cue> =
        translated.iter().map(|cue| (cue.seq_num, cue)).collect();

    let mut aligned = Vec::with_capacity(original.len());
    for (index, cue) in original.iter().enumerate() {
        let matched = by_seq.get(&cue.seq_num).copied().or_else(|| {
            // Positional fallback, guarded by a start-time sanity check so
            // that offset numbering never pairs unrelated lines.
            translated
                .get(index)
                .filter(|candidate| candidate.start == cue.start)
        });

        match matched {
            Some(counterpart) => aligned.push(AlignedCue {
                seq_num: cue.seq_num,
                start: cue.start.clone(),
                end: cue.end.clone(),
                source: cue.text.clone(),
                target: counterpart.text.clone(),
            }),
            None => {
                debug!("No alignment for cue {} ({})", cue.seq_num, cue.start);
            }
        }
    }

    aligned
}
