/*!
 * Tests for the translation service pipeline: codec, aligner, resolver and
 * sampler outputs flowing into the batch translation contract.
 */

use std::sync::Mutex;

use myasub::reference;
use myasub::sampler;
use myasub::service::{
    BatchTranslator, GlossaryTerm, MockProvider, NoopProgress, ProgressSink, TranslationContext,
};
use myasub::srt;

use crate::common::{self, project_from_pairs, simple_track};

struct RecordingProgress {
    updates: Mutex<Vec<(usize, usize)>>,
}

impl RecordingProgress {
    fn new() -> Self {
        Self {
            updates: Mutex::new(Vec::new()),
        }
    }

    fn updates(&self) -> Vec<(usize, usize)> {
        self.updates.lock().unwrap().clone()
    }
}

impl ProgressSink for RecordingProgress {
    fn on_progress(&self, completed: usize, total: usize) {
        self.updates.lock().unwrap().push((completed, total));
    }
}

/// Full pipeline: reference pair feeds the exact map and style examples,
/// project history feeds training examples, and the translator fills every
/// block while honoring reference pre-fill.
#[tokio::test]
async fn test_pipeline_endToEnd_withReferenceAndHistory() {
    common::init_test_logging();
    let input = simple_track(&["Previously on the show", "tell Maria the plan has changed"]);

    // Reference pair covering the recurring intro line.
    let ref_original = simple_track(&["Previously on the show"]);
    let ref_translated = simple_track(&["ယခင်အပိုင်းများတွင်"]);
    let exact_map = reference::build_exact_map(&ref_original, &ref_translated);
    let consistency = reference::extract_style_examples(&ref_original, &ref_translated);

    // Past project history for training examples.
    let history = vec![project_from_pairs(
        "previous-episode.srt",
        &[("a dialogue line from last episode", Some("ပြီးခဲ့သည့်အပိုင်း"))],
        false,
    )];
    let training = sampler::sample_training_examples(&history, 30);
    assert_eq!(training.len(), 1);

    let context = TranslationContext {
        reference_map: Some(exact_map),
        consistency_examples: consistency,
        training_examples: training,
        glossary: vec![GlossaryTerm::new("the plan", "အစီအစဉ်")],
    };

    let mut blocks = srt::parse_blocks(&input);
    let progress = RecordingProgress::new();
    let translator = BatchTranslator::new(MockProvider::working());

    translator
        .translate(&mut blocks, &context, &progress)
        .await
        .unwrap();

    // Intro line came from the reference map, untouched by the provider.
    assert_eq!(blocks[0].target.as_deref(), Some("ယခင်အပိုင်းများတွင်"));
    assert!(blocks[0].from_reference);

    // Dialogue line went through the provider.
    assert_eq!(
        blocks[1].target.as_deref(),
        Some("[MY] tell Maria the plan has changed")
    );
    assert!(!blocks[1].from_reference);

    // Progress reached the total and never decreased.
    let updates = progress.updates();
    assert_eq!(updates.last(), Some(&(2, 2)));
    for pair in updates.windows(2) {
        assert!(pair[1].0 >= pair[0].0);
    }
}

#[tokio::test]
async fn test_pipeline_batching_shouldSplitLargeInputs() {
    let lines: Vec<String> = (0..25).map(|i| format!("dialogue line number {}", i)).collect();
    let refs: Vec<&str> = lines.iter().map(|s| s.as_str()).collect();
    let mut blocks = srt::parse_blocks(&simple_track(&refs));

    let provider = MockProvider::working();
    let translator = BatchTranslator::new(provider).with_batch_size(10);

    translator
        .translate(&mut blocks, &TranslationContext::default(), &NoopProgress)
        .await
        .unwrap();

    assert!(blocks.iter().all(|b| b.target.is_some()));
    assert_eq!(translator.provider().batches_seen(), 3);
    assert_eq!(translator.provider().lines_seen(), 25);
}

#[tokio::test]
async fn test_pipeline_serializedOutput_containsTranslations() {
    let mut blocks = srt::parse_blocks(&simple_track(&["Hello World"]));
    let translator = BatchTranslator::new(MockProvider::working());

    translator
        .translate(&mut blocks, &TranslationContext::default(), &NoopProgress)
        .await
        .unwrap();

    let output = srt::serialize_blocks(&blocks);
    assert!(output.contains("[MY] Hello World"));

    // The output is itself a valid SRT track.
    let reparsed = srt::parse(&output);
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].text, "[MY] Hello World");
}
