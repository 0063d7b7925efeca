/*!
 * Translation service for subtitle translation using LLM providers.
 *
 * The core modules produce plain data (blocks, reference maps, examples);
 * this module owns the batch translation contract that consumes them:
 *
 * - blocks already carrying a translation are left untouched;
 * - the exact-reference map is applied before any provider call;
 * - glossary terms are injected into prompts as hard constraints;
 * - style and training examples are supplied as few-shot context;
 * - progress is reported monotonically up to the total block count.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::ProviderError;
use crate::reference::StyleExample;
use crate::srt::SubtitleBlock;

pub mod mock;
pub mod ollama;
pub mod prompt;

pub use mock::MockProvider;
pub use ollama::OllamaProvider;

/// Default number of cues sent to the provider per request.
pub const DEFAULT_BATCH_SIZE: usize = 10;

/// A glossary entry: a source term that must be rendered with a fixed
/// translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    /// Source language term
    pub source: String,
    /// Required translation
    pub target: String,
}

impl GlossaryTerm {
    /// Create a glossary term.
    pub fn new(source: &str, target: &str) -> Self {
        GlossaryTerm {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Context handed to a translation run, assembled from the reference
/// resolver, the example sampler and the user's glossary.
#[derive(Debug, Clone, Default)]
pub struct TranslationContext {
    /// Exact-match lookup from trimmed source text to known-good translation.
    pub reference_map: Option<HashMap<String, String>>,
    /// Style examples extracted from the current reference pair.
    pub consistency_examples: Vec<StyleExample>,
    /// Training examples sampled from past projects.
    pub training_examples: Vec<StyleExample>,
    /// Hard terminology constraints.
    pub glossary: Vec<GlossaryTerm>,
}

/// One batch of flattened source lines plus the shared context.
#[derive(Debug, Clone)]
pub struct BatchRequest<'a> {
    /// Source lines to translate, newline-flattened, in order.
    pub lines: Vec<String>,
    /// Shared run context.
    pub context: &'a TranslationContext,
}

/// Observer for translation progress.
///
/// `completed` counts blocks that have been handled so far (pre-filled from
/// reference or returned by the provider) and never decreases; `total` is
/// the full block count of the run.
pub trait ProgressSink: Send + Sync {
    /// Called after each unit of progress.
    fn on_progress(&self, completed: usize, total: usize);
}

/// Progress sink that discards all updates.
pub struct NoopProgress;

impl ProgressSink for NoopProgress {
    fn on_progress(&self, _completed: usize, _total: usize) {}
}

impl<F> ProgressSink for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, completed: usize, total: usize) {
        self(completed, total)
    }
}

/// Common trait for LLM translation providers.
///
/// A provider translates one batch of lines at a time; batching, reference
/// pre-fill and progress reporting live in [`BatchTranslator`] so every
/// provider honors the same contract.
#[async_trait]
pub trait TranslateProvider: Send + Sync {
    /// Translate a batch of source lines.
    ///
    /// Returns one slot per input line, in order; `None` marks a line the
    /// provider failed to return (it stays untranslated rather than failing
    /// the batch).
    async fn translate_batch(
        &self,
        request: &BatchRequest<'_>,
    ) -> Result<Vec<Option<String>>, ProviderError>;

    /// Test the connection to the provider.
    async fn test_connection(&self) -> Result<(), ProviderError>;

    /// Human-readable provider name for logging.
    fn name(&self) -> &str;
}

/// Batch translator: drives a provider over a full block list while
/// honoring the translation contract.
pub struct BatchTranslator<P> {
    provider: P,
    batch_size: usize,
}

impl<P: TranslateProvider> BatchTranslator<P> {
    /// Create a translator with the default batch size.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the batch size (minimum 1).
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Access the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Translate `blocks` in place.
    ///
    /// Blocks that already carry a translation are left untouched. Blocks
    /// whose trimmed source text hits the reference map are filled from it
    /// and marked `from_reference` before any provider call. The rest are
    /// translated in batches; lines the provider fails to return stay
    /// untranslated and are logged, never fatal.
    pub async fn translate(
        &self,
        blocks: &mut [SubtitleBlock],
        context: &TranslationContext,
        progress: &dyn ProgressSink,
    ) -> Result<(), ProviderError> {
        let total = blocks.len();
        let mut completed = 0;

        // Reference pre-fill pass.
        let mut pending: Vec<usize> = Vec::new();
        for (index, block) in blocks.iter_mut().enumerate() {
            if block.target.is_some() {
                completed += 1;
                continue;
            }
            if let Some(map) = &context.reference_map {
                if let Some(known) = map.get(block.source.trim()) {
                    block.target = Some(known.clone());
                    block.from_reference = true;
                    completed += 1;
                    continue;
                }
            }
            pending.push(index);
        }
        progress.on_progress(completed, total);

        debug!(
            "Translating {} of {} blocks via {} ({} pre-filled or already translated)",
            pending.len(),
            total,
            self.provider.name(),
            completed
        );

        for chunk in pending.chunks(self.batch_size) {
            let lines: Vec<String> = chunk
                .iter()
                .map(|&index| blocks[index].source.replace('\n', " "))
                .collect();
            let request = BatchRequest { lines, context };

            let translations = self.provider.translate_batch(&request).await?;
            if translations.len() != chunk.len() {
                return Err(ProviderError::ParseError(format!(
                    "Provider returned {} translations for {} lines",
                    translations.len(),
                    chunk.len()
                )));
            }

            for (&index, translation) in chunk.iter().zip(translations) {
                match translation {
                    Some(text) => blocks[index].target = Some(text),
                    None => warn!(
                        "Provider returned no translation for cue {}",
                        blocks[index].seq_num
                    ),
                }
                completed += 1;
                progress.on_progress(completed, total);
            }
        }

        Ok(())
    }
}
