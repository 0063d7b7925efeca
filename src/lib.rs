/*!
 * # myasub — English→Myanmar subtitle translation assistant
 *
 * A Rust library assisting a translator converting SRT subtitle files from
 * English to Myanmar: an LLM drafts translations, and a local store of past
 * corrections improves future drafts.
 *
 * The heart of the crate is the alignment and reference-reconciliation
 * logic, not the surrounding plumbing:
 *
 * - `srt`: best-effort SRT codec (parse / serialize, opaque timestamps)
 * - `align`: pairing cues between two independently produced tracks
 * - `reference`: exact-match map and style-example extraction from a pair
 * - `sampler`: bounded training-example sampling from project history
 *
 * Everything above is pure, synchronous and referentially transparent; it
 * can be invoked from any threading model without locking. The fallible
 * boundaries live in:
 *
 * - `service`: batch translation contract and LLM providers (Ollama, mock)
 * - `store`: SQLite-backed project persistence (save / list / delete)
 * - `errors`: error types for those boundaries
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod align;
pub mod errors;
pub mod reference;
pub mod sampler;
pub mod service;
pub mod srt;
pub mod store;

// Re-export main types for easier usage
pub use align::{align, AlignedCue};
pub use errors::{AppError, ProviderError, StoreError};
pub use reference::{build_exact_map, extract_style_examples, StyleExample};
pub use sampler::sample_training_examples;
pub use service::{BatchTranslator, GlossaryTerm, TranslationContext};
pub use srt::{Cue, SubtitleBlock};
pub use store::{ProjectRecord, ProjectRepository};
