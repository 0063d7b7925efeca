/*!
 * Prompt construction and response parsing for batch translation.
 *
 * Each batch is sent as a list of `<<CUE_n>>` marked lines and the model is
 * asked to answer with the same markers, which makes the response parseable
 * without trusting the model to count. Glossary terms are injected as hard
 * constraints; reference style examples and sampled training examples are
 * supplied as few-shot context.
 */

use once_cell::sync::Lazy;
use regex::Regex;

use super::BatchRequest;
use crate::reference::StyleExample;

/// Marker pattern in model responses.
static CUE_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"<<CUE_(\d+)>>").unwrap());

/// Fixed instruction header for the translation task.
const SYSTEM_PROMPT: &str = "\
You are an expert subtitle translator translating English dialogue to Myanmar.

Rules:
- Translate naturally and idiomatically; keep the tone of spoken dialogue.
- Keep each translation concise: subtitles have limited display time.
- Never translate personal names; transliterate them into Myanmar script.
- Reply with one <<CUE_n>> marker per input cue, each followed by only the
  Myanmar translation for that cue. No commentary, no extra text.";

/// Build the full prompt for one batch request.
pub fn build_batch_prompt(request: &BatchRequest<'_>) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);
    prompt.push('\n');

    if !request.context.glossary.is_empty() {
        prompt.push_str("\nGlossary — these terms MUST be translated exactly as given:\n");
        for term in &request.context.glossary {
            prompt.push_str(&format!("- \"{}\" => \"{}\"\n", term.source, term.target));
        }
    }

    push_example_section(
        &mut prompt,
        "Translations from earlier projects, for style and terminology:",
        &request.context.training_examples,
    );
    push_example_section(
        &mut prompt,
        "Translations from this project's reference track, follow their style closely:",
        &request.context.consistency_examples,
    );

    prompt.push_str("\nTranslate the following cues:\n");
    for (index, line) in request.lines.iter().enumerate() {
        prompt.push_str(&format!("<<CUE_{}>>\n{}\n", index, line));
    }

    prompt
}

fn push_example_section(prompt: &mut String, header: &str, examples: &[StyleExample]) {
    if examples.is_empty() {
        return;
    }
    prompt.push('\n');
    prompt.push_str(header);
    prompt.push('\n');
    for example in examples {
        prompt.push_str(&format!("EN: {}\nMY: {}\n", example.original, example.translated));
    }
}

/// Parse a marker-formatted response into one slot per requested line.
///
/// Markers the model dropped, duplicated out of range, or left empty yield
/// `None` for that slot; later duplicates of the same marker win.
pub fn parse_batch_response(response: &str, line_count: usize) -> Vec<Option<String>> {
    let mut translations = vec![None; line_count];

    let markers: Vec<(usize, usize, usize)> = CUE_MARKER
        .captures_iter(response)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let index: usize = caps.get(1)?.as_str().parse().ok()?;
            Some((index, whole.start(), whole.end()))
        })
        .collect();

    for (position, &(index, _, body_start)) in markers.iter().enumerate() {
        if index >= line_count {
            continue;
        }
        let body_end = markers
            .get(position + 1)
            .map(|&(_, next_start, _)| next_start)
            .unwrap_or(response.len());
        let body = response[body_start..body_end].trim();
        if !body.is_empty() {
            translations[index] = Some(body.to_string());
        }
    }

    translations
}
