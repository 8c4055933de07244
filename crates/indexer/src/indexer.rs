use crate::error::{IndexerError, Result};
use crate::outcome::{ChunkListing, IndexOutcome, RemoveOutcome};
use crate::stats::RetrievalStats;
use docrag_chunker::{ChunkerConfig, TextSplitter};
use docrag_vector_store::{
    ChunkFilter, ChunkRecord, EmbeddingProvider, VectorIndex, VectorStoreError,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Write-side orchestrator: chunk, embed, store; and the inverse.
///
/// Holds shared handles to the embedding provider and vector index so one
/// indexer instance serves many concurrent documents. Index and remove for
/// the *same* document are not mutually excluded here; callers serialize
/// those externally.
pub struct DocumentIndexer {
    splitter: TextSplitter,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl DocumentIndexer {
    pub fn new(
        config: ChunkerConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        index: Arc<dyn VectorIndex>,
    ) -> Result<Self> {
        Ok(Self {
            splitter: TextSplitter::new(config)?,
            embedder,
            index,
        })
    }

    pub fn config(&self) -> &ChunkerConfig {
        self.splitter.config()
    }

    /// Chunk `text`, embed every chunk in one batched call, and bulk-add the
    /// records to the vector index.
    ///
    /// Zero chunks (empty or whitespace-only text) is an input error: the
    /// outcome is unsuccessful, nothing is written, nothing is raised.
    pub async fn index_document(
        &self,
        document_id: &str,
        text: &str,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> IndexOutcome {
        log::info!("Starting document indexing for: {document_id}");

        let chunks = self.splitter.split(text);
        if chunks.is_empty() {
            log::warn!("No chunks created for document: {document_id}");
            return IndexOutcome::nothing_to_index();
        }
        log::info!("Created {} chunks for document: {document_id}", chunks.len());

        match self.write_chunks(document_id, chunks, metadata).await {
            Ok(written) => {
                log::info!("Successfully indexed document: {document_id}");
                IndexOutcome::indexed(written)
            }
            Err(err) => {
                log::error!("Error indexing document {document_id}: {err}");
                IndexOutcome::failed(err.to_string())
            }
        }
    }

    async fn write_chunks(
        &self,
        document_id: &str,
        chunks: Vec<String>,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> Result<usize> {
        let vectors = self.embedder.embed(&chunks).await?;
        if vectors.len() != chunks.len() {
            return Err(VectorStoreError::EmbeddingError(format!(
                "Expected {} vectors, got {}",
                chunks.len(),
                vectors.len()
            ))
            .into());
        }

        let extra = metadata.unwrap_or_default();
        let records: Vec<ChunkRecord> = chunks
            .into_iter()
            .enumerate()
            .map(|(sequence_index, text)| {
                ChunkRecord::new(document_id, sequence_index, text, extra.clone())
            })
            .collect();
        let written = records.len();

        // Snapshot the ids already stored for this document so a failed add
        // only rolls back chunks introduced by this attempt.
        let preexisting: std::collections::HashSet<String> = self
            .index
            .get(&ChunkFilter::documents([document_id]))
            .await?
            .into_iter()
            .map(|record| record.chunk_id)
            .collect();
        let introduced: Vec<String> = records
            .iter()
            .map(|record| record.chunk_id.clone())
            .filter(|id| !preexisting.contains(id))
            .collect();

        if let Err(err) = self.index.add(records, vectors).await {
            // The bulk add is not transactional across arbitrary index
            // implementations; sweep up whatever part of the batch landed.
            self.rollback_partial_add(document_id, &introduced).await;
            return Err(err.into());
        }

        Ok(written)
    }

    async fn rollback_partial_add(&self, document_id: &str, ids: &[String]) {
        match self.index.delete(ids).await {
            Ok(0) => {}
            Ok(removed) => {
                log::warn!(
                    "Rolled back {removed} partially written chunks for document: {document_id}"
                );
            }
            Err(err) => {
                log::error!(
                    "Rollback failed; document {document_id} may be partially indexed: {err}"
                );
            }
        }
    }

    /// Remove all chunks of a document.
    ///
    /// A document with no indexed chunks reports an unsuccessful removal,
    /// letting callers distinguish "removed now" from "already gone".
    pub async fn remove_document(&self, document_id: &str) -> RemoveOutcome {
        match self.try_remove(document_id).await {
            Ok(Some(removed)) => RemoveOutcome::removed(removed),
            Ok(None) => {
                log::warn!("No chunks found for document: {document_id}");
                RemoveOutcome::not_found()
            }
            Err(err) => {
                log::error!("Error removing document {document_id}: {err}");
                RemoveOutcome::failed(err.to_string())
            }
        }
    }

    async fn try_remove(&self, document_id: &str) -> Result<Option<usize>> {
        let records = self
            .index
            .get(&ChunkFilter::documents([document_id]))
            .await?;
        if records.is_empty() {
            return Ok(None);
        }

        let ids: Vec<String> = records.iter().map(|r| r.chunk_id.clone()).collect();
        let removed = self.index.delete(&ids).await?;
        log::info!("Removed {removed} chunks for document: {document_id}");
        Ok(Some(removed))
    }

    /// List a document's chunks in document order.
    ///
    /// A gap or duplicate in the stored sequence indexes is a data-integrity
    /// defect from indexing; it fails the listing instead of returning a
    /// silently mis-ordered set.
    pub async fn get_document_chunks(&self, document_id: &str) -> ChunkListing {
        match self.try_get_chunks(document_id).await {
            Ok(chunks) => ChunkListing::listed(document_id, chunks),
            Err(err) => {
                log::error!("Error getting document chunks for {document_id}: {err}");
                ChunkListing::failed(document_id, err.to_string())
            }
        }
    }

    async fn try_get_chunks(&self, document_id: &str) -> Result<Vec<ChunkRecord>> {
        let mut chunks = self
            .index
            .get(&ChunkFilter::documents([document_id]))
            .await?;
        chunks.sort_by_key(|chunk| chunk.sequence_index);

        for (expected, chunk) in chunks.iter().enumerate() {
            if chunk.sequence_index != expected {
                return Err(IndexerError::CorruptSequence {
                    document_id: document_id.to_string(),
                    expected,
                    actual: chunk.sequence_index,
                });
            }
        }

        Ok(chunks)
    }

    pub async fn stats(&self) -> RetrievalStats {
        let config = self.splitter.config();
        let base = RetrievalStats {
            total_chunks: 0,
            chunk_size: config.chunk_size,
            chunk_overlap: config.chunk_overlap,
            embedding_model: self.embedder.model_id().to_string(),
            embedding_dimension: self.embedder.dimension(),
            error: None,
        };

        match self.index.count().await {
            Ok(total_chunks) => RetrievalStats {
                total_chunks,
                ..base
            },
            Err(err) => {
                log::error!("Error getting retrieval stats: {err}");
                RetrievalStats {
                    error: Some(err.to_string()),
                    ..base
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docrag_vector_store::{HashingEmbedder, MemoryVectorIndex};
    use pretty_assertions::assert_eq;

    fn indexer() -> DocumentIndexer {
        let embedder = Arc::new(HashingEmbedder::new(32));
        let index = Arc::new(MemoryVectorIndex::new(32));
        DocumentIndexer::new(ChunkerConfig::default(), embedder, index).unwrap()
    }

    fn sample_text() -> String {
        let mut text = String::new();
        for i in 0..40 {
            text.push_str(&format!("Sentence number {i} talks about indexing. "));
        }
        text
    }

    #[tokio::test]
    async fn test_index_document_writes_contiguous_chunks() {
        let indexer = indexer();
        let outcome = indexer.index_document("doc-1", &sample_text(), None).await;

        assert!(outcome.success);
        assert!(outcome.chunks_indexed > 1);
        assert!(outcome.error.is_none());

        let listing = indexer.get_document_chunks("doc-1").await;
        assert!(listing.error.is_none());
        assert_eq!(listing.chunks.len(), outcome.chunks_indexed);
        for (i, chunk) in listing.chunks.iter().enumerate() {
            assert_eq!(chunk.sequence_index, i);
            assert_eq!(chunk.chunk_id, format!("doc-1_chunk_{i}"));
            assert_eq!(chunk.document_id, "doc-1");
            assert!(!chunk.text.is_empty());
        }
    }

    #[tokio::test]
    async fn test_empty_text_indexes_nothing() {
        let indexer = indexer();

        let outcome = indexer.index_document("doc-1", "", None).await;
        assert!(!outcome.success);
        assert_eq!(outcome.chunks_indexed, 0);
        assert!(outcome.error.is_none());

        let outcome = indexer.index_document("doc-1", "   \n  ", None).await;
        assert!(!outcome.success);

        assert_eq!(indexer.stats().await.total_chunks, 0);
    }

    #[tokio::test]
    async fn test_caller_metadata_is_merged_into_every_chunk() {
        let indexer = indexer();
        let mut metadata = HashMap::new();
        metadata.insert("filename".to_string(), serde_json::json!("manual.pdf"));
        metadata.insert("page_count".to_string(), serde_json::json!(12));

        let outcome = indexer
            .index_document("doc-1", &sample_text(), Some(metadata))
            .await;
        assert!(outcome.success);

        let listing = indexer.get_document_chunks("doc-1").await;
        for chunk in &listing.chunks {
            assert_eq!(chunk.extra["filename"], serde_json::json!("manual.pdf"));
            assert_eq!(chunk.extra["page_count"], serde_json::json!(12));
        }
    }

    #[tokio::test]
    async fn test_excerpt_is_a_bounded_preview() {
        let indexer = indexer();
        indexer.index_document("doc-1", &sample_text(), None).await;

        let listing = indexer.get_document_chunks("doc-1").await;
        for chunk in &listing.chunks {
            assert!(chunk.excerpt.chars().count() <= 103);
            if chunk.text.chars().count() > 100 {
                assert!(chunk.excerpt.ends_with("..."));
            }
        }
    }

    #[tokio::test]
    async fn test_remove_document_is_not_idempotent_success() {
        let indexer = indexer();
        indexer.index_document("doc-1", &sample_text(), None).await;
        let before = indexer.stats().await.total_chunks;
        assert!(before > 0);

        let first = indexer.remove_document("doc-1").await;
        assert!(first.success);
        assert_eq!(first.chunks_removed, before);

        // Second removal finds nothing and reports failure without error.
        let second = indexer.remove_document("doc-1").await;
        assert!(!second.success);
        assert_eq!(second.chunks_removed, 0);
        assert!(second.error.is_none());
        assert_eq!(indexer.stats().await.total_chunks, 0);
    }

    #[tokio::test]
    async fn test_remove_document_leaves_other_documents_alone() {
        let indexer = indexer();
        indexer.index_document("doc-1", &sample_text(), None).await;
        indexer.index_document("doc-2", &sample_text(), None).await;

        let doc1_chunks = indexer.get_document_chunks("doc-1").await.chunks.len();
        let removed = indexer.remove_document("doc-2").await;
        assert!(removed.success);

        let listing = indexer.get_document_chunks("doc-1").await;
        assert_eq!(listing.chunks.len(), doc1_chunks);
        assert!(indexer.get_document_chunks("doc-2").await.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_sequence_fails_the_listing() {
        let embedder = Arc::new(HashingEmbedder::new(8));
        let index = Arc::new(MemoryVectorIndex::new(8));
        let indexer = DocumentIndexer::new(
            ChunkerConfig::default(),
            embedder,
            index.clone(),
        )
        .unwrap();

        // Plant a gap: indexes 0 and 2 with no 1.
        let records = vec![
            ChunkRecord::new("doc-x", 0, "first", HashMap::new()),
            ChunkRecord::new("doc-x", 2, "third", HashMap::new()),
        ];
        index.add(records, vec![vec![0.0; 8], vec![0.0; 8]]).await.unwrap();

        let listing = indexer.get_document_chunks("doc-x").await;
        assert!(listing.error.is_some());
        assert!(listing.chunks.is_empty());
    }

    #[tokio::test]
    async fn test_stats_reports_configuration() {
        let indexer = indexer();
        indexer.index_document("doc-1", &sample_text(), None).await;

        let stats = indexer.stats().await;
        assert!(stats.total_chunks > 0);
        assert_eq!(stats.chunk_size, 500);
        assert_eq!(stats.chunk_overlap, 50);
        assert_eq!(stats.embedding_model, "feature-hash-v1");
        assert_eq!(stats.embedding_dimension, 32);
        assert!(stats.error.is_none());
    }

    #[tokio::test]
    async fn test_reindexing_same_document_without_removal_fails() {
        let indexer = indexer();
        assert!(indexer.index_document("doc-1", &sample_text(), None).await.success);

        // Chunk ids collide with the already-stored set; the outcome carries
        // the collaborator's rejection and the original chunks survive.
        let before = indexer.stats().await.total_chunks;
        let outcome = indexer.index_document("doc-1", &sample_text(), None).await;
        assert!(!outcome.success);
        assert!(outcome.error.is_some());
        assert_eq!(indexer.stats().await.total_chunks, before);
    }
}
