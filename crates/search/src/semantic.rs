use crate::error::{Result, SearchError};
use crate::types::{QueryOptions, QueryResponse, QueryResult, ResultSource};
use docrag_vector_store::{ChunkFilter, EmbeddingProvider, VectorIndex};
use std::sync::Arc;

/// Embedding-backed nearest-neighbor search with a confidence threshold.
///
/// The query is embedded with the same provider that built the index, so
/// both live in one vector space. Cosine distance `d` maps to confidence
/// `1 - d`, clamped into `[0, 1]` in case the underlying index reports a
/// distance outside the expected range.
pub struct SemanticSearch {
    embedder: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl SemanticSearch {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embedder, index }
    }

    /// Run a semantic query, recovering collaborator failures into the
    /// response envelope.
    pub async fn query(&self, query_text: &str, options: &QueryOptions) -> QueryResponse {
        match self.run(query_text, options).await {
            Ok(results) => QueryResponse::success(
                query_text,
                results,
                options.document_ids.as_ref().map(Vec::len),
            ),
            Err(err) => {
                log::error!("Semantic query failed for '{query_text}': {err}");
                QueryResponse::failure(query_text, err.to_string())
            }
        }
    }

    pub(crate) async fn run(
        &self,
        query_text: &str,
        options: &QueryOptions,
    ) -> Result<Vec<QueryResult>> {
        log::debug!(
            "Semantic query: '{}' (n_results: {}, min_confidence: {})",
            query_text,
            options.n_results,
            options.min_confidence
        );

        let vectors = self.embedder.embed(&[query_text.to_string()]).await?;
        let vector = vectors
            .into_iter()
            .next()
            .ok_or_else(|| SearchError::Other("Embedding provider returned no vector".into()))?;

        let filter = ChunkFilter::from_document_ids(options.document_ids.as_deref());
        let hits = self.index.query(&vector, options.n_results, &filter).await?;

        let mut results: Vec<QueryResult> = hits
            .into_iter()
            .map(|hit| QueryResult {
                confidence: (1.0 - hit.distance).clamp(0.0, 1.0),
                record: hit.record,
                source: ResultSource::Semantic,
            })
            .filter(|result| result.confidence >= options.min_confidence)
            .collect();

        // Stable sort: equal confidences keep their retrieval order.
        results.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        log::debug!("Semantic query returned {} results", results.len());
        Ok(results)
    }
}
