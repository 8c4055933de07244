use crate::error::Result;
use docrag_chunker::ChunkerConfig;
use docrag_indexer::{ChunkListing, DocumentIndexer, IndexOutcome, RemoveOutcome, RetrievalStats};
use docrag_search::{
    HybridOptions, HybridResponse, HybridSearch, QueryOptions, QueryResponse, SemanticSearch,
};
use docrag_vector_store::{EmbeddingProvider, HashingEmbedder, MemoryVectorIndex, VectorIndex};
use std::collections::HashMap;
use std::sync::Arc;

/// The retrieval core behind one handle.
///
/// Construct once, share by reference: the embedding provider and vector
/// index inside are `Arc`-shared between the write and read paths, so the
/// index is always queried in the vector space it was built with.
pub struct RetrievalEngine {
    indexer: DocumentIndexer,
    semantic: SemanticSearch,
    hybrid: HybridSearch,
}

impl RetrievalEngine {
    pub fn new(
        config: ChunkerConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Result<Self> {
        log::info!(
            "Initializing retrieval engine (model: {}, chunk_size: {}, chunk_overlap: {})",
            embedder.model_id(),
            config.chunk_size,
            config.chunk_overlap
        );
        Ok(Self {
            indexer: DocumentIndexer::new(config, embedder.clone(), index.clone())?,
            semantic: SemanticSearch::new(embedder.clone(), index.clone()),
            hybrid: HybridSearch::new(embedder, index),
        })
    }

    /// In-process engine with the hashing embedder and in-memory index.
    pub fn with_defaults() -> Result<Self> {
        let embedder = Arc::new(HashingEmbedder::default());
        let index = Arc::new(MemoryVectorIndex::new(embedder.dimension()));
        Self::new(ChunkerConfig::default(), embedder, index)
    }

    /// Index a document's extracted text under `document_id`.
    pub async fn index_document(
        &self,
        document_id: &str,
        text: &str,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> IndexOutcome {
        self.indexer.index_document(document_id, text, metadata).await
    }

    /// Remove all chunks indexed for `document_id`.
    pub async fn remove_document(&self, document_id: &str) -> RemoveOutcome {
        self.indexer.remove_document(document_id).await
    }

    /// Confidence-thresholded semantic search.
    pub async fn query(&self, query_text: &str, options: &QueryOptions) -> QueryResponse {
        self.semantic.query(query_text, options).await
    }

    /// Semantic plus keyword search merged by weighted score fusion.
    pub async fn hybrid_search(&self, query_text: &str, options: &HybridOptions) -> HybridResponse {
        self.hybrid.search(query_text, options).await
    }

    /// All chunks of one document, sorted by sequence index.
    pub async fn get_document_chunks(&self, document_id: &str) -> ChunkListing {
        self.indexer.get_document_chunks(document_id).await
    }

    /// Current index size and configuration.
    pub async fn stats(&self) -> RetrievalStats {
        self.indexer.stats().await
    }
}
