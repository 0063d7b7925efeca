/*!
 * Persisted project records.
 *
 * A project is one translated subtitle file together with its metadata.
 * The core treats stored projects purely as an opaque source of block lists
 * for the example sampler; only the store itself interprets the rest.
 */

use serde::{Deserialize, Serialize};

use crate::srt::SubtitleBlock;

/// A persisted translation project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    /// Unique project identifier (UUID).
    pub id: String,
    /// Name of the subtitle file this project was created from.
    pub file_name: String,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
    /// Subtitle blocks, including any translations filled in so far.
    pub cues: Vec<SubtitleBlock>,
    /// Whether this project was imported as external training data rather
    /// than produced by a translation run.
    #[serde(default)]
    pub is_external_import: bool,
}

impl ProjectRecord {
    /// Create a new project record with a fresh id and timestamp.
    pub fn new(file_name: &str, cues: Vec<SubtitleBlock>, is_external_import: bool) -> Self {
        ProjectRecord {
            id: uuid::Uuid::new_v4().to_string(),
            file_name: file_name.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            cues,
            is_external_import,
        }
    }

    /// Whether any block in this project carries a translation.
    pub fn has_translations(&self) -> bool {
        self.cues
            .iter()
            .any(|cue| cue.target.as_deref().is_some_and(|t| !t.is_empty()))
    }
}
