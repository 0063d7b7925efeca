/*!
 * Training example sampling from past projects.
 *
 * Scans the persisted project history and extracts a bounded sample of
 * high-quality (original, translation) pairs for long-term style
 * reinforcement. The policy is fixed and deterministic: project recency
 * first, in-project order second, no randomization — which keeps repeated
 * translation runs reproducible and the sampler trivially testable.
 */

use crate::reference::StyleExample;
use crate::store::models::ProjectRecord;

/// Default overall cap on sampled training examples.
pub const DEFAULT_TRAINING_LIMIT: usize = 30;

/// At most this many examples are taken from any single project; early cues
/// tend to be the character-establishing dialogue worth keeping.
const MAX_EXAMPLES_PER_PROJECT: usize = 10;

/// Minimum source length (in characters); excludes short interjections.
const TRAINING_MIN_CHARS: usize = 10;

/// Sample up to `limit` training examples from the project history.
///
/// `projects` is expected newest-first, as produced by the project store.
/// A project qualifies if it was imported as external training data or
/// contains at least one translated block. Within a qualifying project,
/// blocks qualify when both texts are present, the source is longer than
/// ten characters and is not purely numeric. Returns immediately once the
/// limit is reached, even mid-project.
pub fn sample_training_examples(projects: &[ProjectRecord], limit: usize) -> Vec<StyleExample> {
    let mut examples = Vec::new();

    for project in projects {
        if !project.is_external_import && !project.has_translations() {
            continue;
        }

        let mut taken = 0;
        for cue in &project.cues {
            let Some(target) = cue.target.as_deref().filter(|t| !t.is_empty()) else {
                continue;
            };
            if cue.source.chars().count() <= TRAINING_MIN_CHARS || is_purely_numeric(&cue.source) {
                continue;
            }

            examples.push(StyleExample::new(&cue.source, target));
            if examples.len() >= limit {
                return examples;
            }

            taken += 1;
            if taken >= MAX_EXAMPLES_PER_PROJECT {
                break;
            }
        }
    }

    examples
}

/// Sample with the default limit.
pub fn sample_default(projects: &[ProjectRecord]) -> Vec<StyleExample> {
    sample_training_examples(projects, DEFAULT_TRAINING_LIMIT)
}

/// Non-empty trimmed text consisting solely of ASCII digits.
fn is_purely_numeric(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}
