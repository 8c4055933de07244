use docrag_vector_store::ChunkRecord;
use serde::Serialize;

/// Result of an `index_document` call.
///
/// `success: false` with no error means the input produced nothing to index
/// (an input error); an error message means a collaborator failed.
#[derive(Debug, Clone, Serialize)]
pub struct IndexOutcome {
    pub success: bool,
    pub chunks_indexed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IndexOutcome {
    pub(crate) fn indexed(chunks_indexed: usize) -> Self {
        Self {
            success: true,
            chunks_indexed,
            error: None,
        }
    }

    pub(crate) fn nothing_to_index() -> Self {
        Self {
            success: false,
            chunks_indexed: 0,
            error: None,
        }
    }

    pub(crate) fn failed(error: String) -> Self {
        Self {
            success: false,
            chunks_indexed: 0,
            error: Some(error),
        }
    }
}

/// Result of a `remove_document` call.
///
/// Removing a document with no indexed chunks reports `success: false` so
/// callers can detect an already-removed document; it is not an error.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveOutcome {
    pub success: bool,
    pub chunks_removed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RemoveOutcome {
    pub(crate) fn removed(chunks_removed: usize) -> Self {
        Self {
            success: true,
            chunks_removed,
            error: None,
        }
    }

    pub(crate) fn not_found() -> Self {
        Self {
            success: false,
            chunks_removed: 0,
            error: None,
        }
    }

    pub(crate) fn failed(error: String) -> Self {
        Self {
            success: false,
            chunks_removed: 0,
            error: Some(error),
        }
    }
}

/// All chunks of one document, sorted by sequence index.
#[derive(Debug, Clone, Serialize)]
pub struct ChunkListing {
    pub document_id: String,
    pub chunks: Vec<ChunkRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChunkListing {
    pub(crate) fn listed(document_id: &str, chunks: Vec<ChunkRecord>) -> Self {
        Self {
            document_id: document_id.to_string(),
            chunks,
            error: None,
        }
    }

    pub(crate) fn failed(document_id: &str, error: String) -> Self {
        Self {
            document_id: document_id.to_string(),
            chunks: Vec::new(),
            error: Some(error),
        }
    }
}
