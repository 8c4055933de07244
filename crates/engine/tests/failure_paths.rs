use async_trait::async_trait;
use docrag_engine::{
    ChunkerConfig, HybridOptions, QueryOptions, RetrievalEngine,
};
use docrag_vector_store::{
    ChunkFilter, ChunkRecord, EmbeddingProvider, HashingEmbedder, MemoryVectorIndex, ScoredChunk,
    VectorIndex, VectorStoreError,
};
use std::sync::Arc;

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Embedding provider that is permanently unreachable.
struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _texts: &[String]) -> docrag_vector_store::Result<Vec<Vec<f32>>> {
        Err(VectorStoreError::EmbeddingError(
            "embedding service unreachable".to_string(),
        ))
    }

    fn dimension(&self) -> usize {
        8
    }

    fn model_id(&self) -> &str {
        "failing-embedder"
    }
}

/// Vector index that fails every call.
struct FailingIndex;

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn add(
        &self,
        _records: Vec<ChunkRecord>,
        _vectors: Vec<Vec<f32>>,
    ) -> docrag_vector_store::Result<()> {
        Err(VectorStoreError::IndexError("index offline".to_string()))
    }

    async fn query(
        &self,
        _vector: &[f32],
        _k: usize,
        _filter: &ChunkFilter,
    ) -> docrag_vector_store::Result<Vec<ScoredChunk>> {
        Err(VectorStoreError::IndexError("index offline".to_string()))
    }

    async fn get(&self, _filter: &ChunkFilter) -> docrag_vector_store::Result<Vec<ChunkRecord>> {
        Err(VectorStoreError::IndexError("index offline".to_string()))
    }

    async fn delete(&self, _ids: &[String]) -> docrag_vector_store::Result<usize> {
        Err(VectorStoreError::IndexError("index offline".to_string()))
    }

    async fn count(&self) -> docrag_vector_store::Result<usize> {
        Err(VectorStoreError::IndexError("index offline".to_string()))
    }
}

/// Index that writes the first record of a batch and then dies, leaving a
/// partial bulk add behind for the caller to compensate.
struct PartialAddIndex {
    inner: MemoryVectorIndex,
}

impl PartialAddIndex {
    fn new(dimension: usize) -> Self {
        Self {
            inner: MemoryVectorIndex::new(dimension),
        }
    }
}

#[async_trait]
impl VectorIndex for PartialAddIndex {
    async fn add(
        &self,
        records: Vec<ChunkRecord>,
        vectors: Vec<Vec<f32>>,
    ) -> docrag_vector_store::Result<()> {
        let mut records = records.into_iter();
        let mut vectors = vectors.into_iter();
        if let (Some(record), Some(vector)) = (records.next(), vectors.next()) {
            self.inner.add(vec![record], vec![vector]).await?;
        }
        Err(VectorStoreError::IndexError(
            "index node lost mid-batch".to_string(),
        ))
    }

    async fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: &ChunkFilter,
    ) -> docrag_vector_store::Result<Vec<ScoredChunk>> {
        self.inner.query(vector, k, filter).await
    }

    async fn get(&self, filter: &ChunkFilter) -> docrag_vector_store::Result<Vec<ChunkRecord>> {
        self.inner.get(filter).await
    }

    async fn delete(&self, ids: &[String]) -> docrag_vector_store::Result<usize> {
        self.inner.delete(ids).await
    }

    async fn count(&self) -> docrag_vector_store::Result<usize> {
        self.inner.count().await
    }
}

fn long_text() -> String {
    "Replica lag monitoring catches slow followers early. ".repeat(25)
}

#[tokio::test]
async fn test_embedder_failure_becomes_index_outcome() {
    init_logs();
    let index = Arc::new(MemoryVectorIndex::new(8));
    let engine =
        RetrievalEngine::new(ChunkerConfig::default(), Arc::new(FailingEmbedder), index.clone())
            .unwrap();

    let outcome = engine.index_document("doc", &long_text(), None).await;
    assert!(!outcome.success);
    assert_eq!(outcome.chunks_indexed, 0);
    assert!(outcome.error.as_deref().unwrap().contains("unreachable"));

    // Nothing was written.
    assert_eq!(index.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_embedder_failure_becomes_query_error() {
    init_logs();
    let engine = RetrievalEngine::new(
        ChunkerConfig::default(),
        Arc::new(FailingEmbedder),
        Arc::new(MemoryVectorIndex::new(8)),
    )
    .unwrap();

    let response = engine.query("anything", &QueryOptions::default()).await;
    assert!(response.results.is_empty());
    assert_eq!(response.total_found, 0);
    assert!(response.error.is_some());
}

#[tokio::test]
async fn test_index_failure_surfaces_in_every_operation() {
    init_logs();
    let engine = RetrievalEngine::new(
        ChunkerConfig::default(),
        Arc::new(HashingEmbedder::new(8)),
        Arc::new(FailingIndex),
    )
    .unwrap();

    let outcome = engine.index_document("doc", &long_text(), None).await;
    assert!(!outcome.success);
    assert!(outcome.error.is_some());

    let removed = engine.remove_document("doc").await;
    assert!(!removed.success);
    assert!(removed.error.is_some());

    let response = engine.query("lag", &QueryOptions::default()).await;
    assert!(response.error.is_some());

    let listing = engine.get_document_chunks("doc").await;
    assert!(listing.error.is_some());
    assert!(listing.chunks.is_empty());

    let stats = engine.stats().await;
    assert!(stats.error.is_some());
    assert_eq!(stats.total_chunks, 0);
}

#[tokio::test]
async fn test_hybrid_reports_error_only_when_both_legs_fail() {
    init_logs();
    let engine = RetrievalEngine::new(
        ChunkerConfig::default(),
        Arc::new(HashingEmbedder::new(8)),
        Arc::new(FailingIndex),
    )
    .unwrap();

    let response = engine
        .hybrid_search("lag", &HybridOptions::new(5))
        .await;
    assert!(response.results.is_empty());
    assert!(response.error.is_some());
}

#[tokio::test]
async fn test_hybrid_survives_a_single_failing_leg() {
    init_logs();
    // Seed the index directly, then pair it with a dead embedder: the
    // semantic leg fails, the keyword leg still answers.
    let embedder = HashingEmbedder::new(8);
    let index = Arc::new(MemoryVectorIndex::new(8));
    let records = vec![ChunkRecord::new(
        "doc",
        0,
        "replica lag monitoring",
        Default::default(),
    )];
    let vectors = embedder
        .embed(&["replica lag monitoring".to_string()])
        .await
        .unwrap();
    index.add(records, vectors).await.unwrap();

    let engine =
        RetrievalEngine::new(ChunkerConfig::default(), Arc::new(FailingEmbedder), index).unwrap();

    let response = engine.hybrid_search("lag", &HybridOptions::new(5)).await;
    assert!(response.error.is_none());
    assert_eq!(response.semantic_count, 0);
    assert_eq!(response.keyword_count, 1);
    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].record.chunk_id, "doc_chunk_0");
}

#[tokio::test]
async fn test_partial_bulk_add_is_rolled_back() {
    init_logs();
    let index = Arc::new(PartialAddIndex::new(8));
    let engine = RetrievalEngine::new(
        ChunkerConfig::default(),
        Arc::new(HashingEmbedder::new(8)),
        index.clone(),
    )
    .unwrap();

    let outcome = engine.index_document("doc", &long_text(), None).await;
    assert!(!outcome.success);
    assert!(outcome.error.as_deref().unwrap().contains("mid-batch"));

    // The one chunk the index accepted before dying was swept up again.
    assert_eq!(index.count().await.unwrap(), 0);
    assert!(engine.get_document_chunks("doc").await.chunks.is_empty());
}
