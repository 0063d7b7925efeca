/*!
 * Reference reconciliation: deriving reusable translation knowledge from a
 * pair of subtitle tracks.
 *
 * Two different lookups are built from the same pair, with deliberately
 * different pairing strategies:
 *
 * - The exact-match map pairs cues positionally. It exists for short
 *   recurring lines (intros, credits) where the reference tracks are
 *   expected to already correspond one to one, so index pairing is reliable
 *   and precision matters most.
 * - Style examples are computed over the id/timestamp-aware alignment, which
 *   trades a little precision for coverage across tracks with drifting
 *   numbering.
 */

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::align;
use crate::srt;

/// Hard cap on the number of style examples extracted from one pair.
pub const STYLE_EXAMPLE_CAP: usize = 40;

/// Below this many collected examples, long lines qualify even without a
/// proper noun.
const STYLE_SOFT_CAP: usize = 20;

/// Minimum source length (in characters) for the long-line rule.
const STYLE_MIN_CHARS: usize = 20;

/// A lowercase letter followed by a space and an uppercase letter: a cheap
/// proxy for a capitalized word appearing mid-sentence, e.g. a name.
static PROPER_NOUN_HINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-z] [A-Z]").unwrap());

/// An (original, translation) pair used as few-shot context for a
/// downstream translator. Both fields are newline-flattened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleExample {
    /// Source language text, embedded newlines replaced with spaces.
    pub original: String,
    /// Translated text, embedded newlines replaced with spaces.
    pub translated: String,
}

impl StyleExample {
    /// Build an example, flattening embedded newlines in both fields.
    pub fn new(original: &str, translated: &str) -> Self {
        StyleExample {
            original: original.replace('\n', " "),
            translated: translated.replace('\n', " "),
        }
    }
}

/// Build an exact-match lookup from trimmed original text to trimmed
/// translated text.
///
/// Pairs the i-th original cue with the i-th translated cue; pairs where
/// either side trims to empty are skipped. When the same original text
/// recurs (common for intro lines), the last occurrence wins.
pub fn build_exact_map(
    original_content: &str,
    translated_content: &str,
) -> HashMap<String, String> {
    let original = srt::parse(original_content);
    let translated = srt::parse(translated_content);

    let mut map = HashMap::new();
    for (source, target) in original.iter().zip(translated.iter()) {
        let key = source.text.trim();
        let value = target.text.trim();
        if key.is_empty() || value.is_empty() {
            continue;
        }
        map.insert(key.to_string(), value.to_string());
    }

    map
}

/// Default proper-noun heuristic used by [`extract_style_examples`].
pub fn has_proper_noun(text: &str) -> bool {
    PROPER_NOUN_HINT.is_match(text)
}

/// Extract a bounded set of "interesting" aligned pairs for use as few-shot
/// style context, using the default proper-noun heuristic.
pub fn extract_style_examples(
    original_content: &str,
    translated_content: &str,
) -> Vec<StyleExample> {
    extract_style_examples_with(original_content, translated_content, has_proper_noun)
}

/// Extract style examples with a caller-supplied proper-noun predicate.
///
/// A pair qualifies when the predicate fires on its source text, or — while
/// fewer than 20 examples have been collected — when the source text is
/// longer than 20 characters. Collection stops outright at 40 examples.
pub fn extract_style_examples_with<P>(
    original_content: &str,
    translated_content: &str,
    is_interesting: P,
) -> Vec<StyleExample>
where
    P: Fn(&str) -> bool,
{
    let mut examples = Vec::new();

    for pair in align::align(original_content, translated_content) {
        let long_enough = pair.source.chars().count() > STYLE_MIN_CHARS;
        let include = is_interesting(&pair.source)
            || (examples.len() < STYLE_SOFT_CAP && long_enough);

        if include {
            examples.push(StyleExample::new(&pair.source, &pair.target));
            if examples.len() >= STYLE_EXAMPLE_CAP {
                break;
            }
        }
    }

    examples
}
