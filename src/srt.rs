/*!
 * SRT codec: parsing and serialization of the textual SubRip block format.
 *
 * Parsing is deliberately best-effort: subtitle files found in the wild are
 * frequently malformed, so a candidate block that cannot be understood is
 * dropped rather than failing the whole file. Both operations are pure
 * functions over in-memory text with no hidden state, so they can be called
 * repeatedly and concurrently without any locking discipline.
 *
 * Timestamps are treated as opaque strings and copied through verbatim; the
 * codec never converts them to numeric time.
 */

use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Separator between cue blocks: a run of two or more newlines.
/// Tolerates extra blank lines between cues.
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{2,}").unwrap());

/// A single parsed subtitle cue.
///
/// The codec is symmetric: it does not know whether the file it parsed is a
/// source track or a translation track, so `text` simply holds whatever the
/// cue said. Role assignment (source vs. target) happens in the aligner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    /// Sequence number from the source file. Not guaranteed unique or
    /// contiguous across independently authored files.
    pub seq_num: u32,
    /// Start timestamp, verbatim from the file (`HH:MM:SS,mmm`).
    pub start: String,
    /// End timestamp, verbatim from the file.
    pub end: String,
    /// Cue text; may contain embedded newlines for multi-line cues.
    pub text: String,
}

impl Cue {
    /// Create a new cue.
    pub fn new(seq_num: u32, start: &str, end: &str, text: &str) -> Self {
        Cue {
            seq_num,
            start: start.to_string(),
            end: end.to_string(),
            text: text.to_string(),
        }
    }
}

impl fmt::Display for Cue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\n{} --> {}\n{}", self.seq_num, self.start, self.end, self.text)
    }
}

/// A subtitle block as it flows through the translation pipeline: a source
/// cue optionally carrying a translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleBlock {
    /// Sequence number from the source file.
    pub seq_num: u32,
    /// Start timestamp, verbatim.
    pub start: String,
    /// End timestamp, verbatim.
    pub end: String,
    /// Original (source language) text.
    pub source: String,
    /// Translated text, once available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    /// Whether the translation was copied from an exact-reference match
    /// rather than produced by a translation provider.
    #[serde(default)]
    pub from_reference: bool,
}

impl SubtitleBlock {
    /// Build an untranslated block from a parsed cue.
    pub fn from_cue(cue: Cue) -> Self {
        SubtitleBlock {
            seq_num: cue.seq_num,
            start: cue.start,
            end: cue.end,
            source: cue.text,
            target: None,
            from_reference: false,
        }
    }

    /// Text to emit when serializing: the translation if present, otherwise
    /// the source text.
    pub fn output_text(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.source)
    }
}

/// Parse raw SRT content into cues, in source file order.
///
/// Malformed candidate blocks (missing sequence number, missing `-->` timing
/// line, fewer than three lines) are silently dropped; degenerate input
/// yields an empty vector, never an error.
pub fn parse(content: &str) -> Vec<Cue> {
    let normalized = content.replace("\r\n", "\n").replace('\r', "\n");
    BLOCK_SEPARATOR
        .split(&normalized)
        .filter_map(parse_block)
        .collect()
}

/// Parse raw SRT content straight into pipeline blocks.
pub fn parse_blocks(content: &str) -> Vec<SubtitleBlock> {
    parse(content).into_iter().map(SubtitleBlock::from_cue).collect()
}

/// Parse one candidate block, or `None` if it is not a well-formed cue.
fn parse_block(candidate: &str) -> Option<Cue> {
    let candidate = candidate.trim();
    let lines: Vec<&str> = candidate.split('\n').collect();

    // Need at least sequence number, timing line and one text line.
    if lines.len() < 3 {
        if !candidate.is_empty() {
            debug!("Dropping short candidate block ({} lines)", lines.len());
        }
        return None;
    }

    let seq_num = match lines[0].trim().parse::<u32>() {
        Ok(num) => num,
        Err(_) => {
            debug!("Dropping block with non-numeric sequence line: {:?}", lines[0]);
            return None;
        }
    };

    let (start, end) = match lines[1].split_once("-->") {
        Some((start, end)) => (start.trim(), end.trim()),
        None => {
            debug!("Dropping block {} with no '-->' timing line", seq_num);
            return None;
        }
    };

    Some(Cue {
        seq_num,
        start: start.to_string(),
        end: end.to_string(),
        text: lines[2..].join("\n"),
    })
}

/// Serialize cues back to SRT text: `seq\nstart --> end\ntext`, blocks joined
/// by a blank line.
pub fn serialize(cues: &[Cue]) -> String {
    cues.iter()
        .map(|cue| cue.to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Serialize pipeline blocks, substituting the translation where present.
///
/// Re-parsing the result yields cues whose text is the translated text, which
/// is exactly what a downstream player (or a re-import) should see.
pub fn serialize_blocks(blocks: &[SubtitleBlock]) -> String {
    blocks
        .iter()
        .map(|block| {
            format!(
                "{}\n{} --> {}\n{}",
                block.seq_num,
                block.start,
                block.end,
                block.output_text()
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
