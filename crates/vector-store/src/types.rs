use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of characters kept in a chunk's display excerpt.
const EXCERPT_CHARS: usize = 100;

/// A contiguous text span of one source document, the unit of embedding and
/// storage.
///
/// Records are created in bulk when a document is indexed, never mutated,
/// and destroyed in bulk when the document is removed. For a given
/// `document_id` the `sequence_index` values form a contiguous `0..N` range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// `"{document_id}_chunk_{sequence_index}"`, unique within the index
    pub chunk_id: String,

    /// Lookup key for the owning document
    pub document_id: String,

    /// 0-based position within the source document
    pub sequence_index: usize,

    /// The chunk text, non-empty after trimming
    pub text: String,

    /// Truncated preview derived at write time and never recomputed
    pub excerpt: String,

    /// Caller-supplied metadata merged at write time
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl ChunkRecord {
    pub fn new(
        document_id: impl Into<String>,
        sequence_index: usize,
        text: impl Into<String>,
        extra: HashMap<String, serde_json::Value>,
    ) -> Self {
        let document_id = document_id.into();
        let text = text.into();
        Self {
            chunk_id: format!("{document_id}_chunk_{sequence_index}"),
            excerpt: make_excerpt(&text),
            document_id,
            sequence_index,
            text,
            extra,
        }
    }
}

/// First [`EXCERPT_CHARS`] characters plus an ellipsis when truncated.
fn make_excerpt(text: &str) -> String {
    let mut chars = text.char_indices();
    match chars.nth(EXCERPT_CHARS) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// A nearest-neighbor hit: the stored record plus its cosine distance to the
/// query vector (lower is closer).
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub record: ChunkRecord,
    pub distance: f32,
}
