use serde::Serialize;

/// Point-in-time statistics about the retrieval core.
#[derive(Debug, Clone, Serialize)]
pub struct RetrievalStats {
    /// Chunks currently stored across all documents
    pub total_chunks: usize,

    /// Configured chunk window size in characters
    pub chunk_size: usize,

    /// Configured chunk overlap in characters
    pub chunk_overlap: usize,

    /// Identifier of the embedding model backing the index
    pub embedding_model: String,

    /// Vector length of the embedding space
    pub embedding_dimension: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
