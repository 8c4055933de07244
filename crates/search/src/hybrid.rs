use crate::fusion::ScoreFusion;
use crate::keyword::KeywordSearch;
use crate::semantic::SemanticSearch;
use crate::types::{HybridOptions, HybridResponse, QueryOptions, QueryResult};
use docrag_vector_store::{EmbeddingProvider, VectorIndex};
use std::sync::Arc;

/// Hybrid search: semantic and keyword retrieval merged by weighted score
/// fusion.
///
/// Both legs over-fetch `2 * n_results` candidates so the fusion step has
/// enough material to re-rank. A leg that fails contributes an empty set and
/// the other leg still answers; only a failure of both legs surfaces in the
/// response's `error`.
pub struct HybridSearch {
    semantic: SemanticSearch,
    keyword: KeywordSearch,
}

impl HybridSearch {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self {
            semantic: SemanticSearch::new(embedder, index.clone()),
            keyword: KeywordSearch::new(index),
        }
    }

    pub async fn search(&self, query_text: &str, options: &HybridOptions) -> HybridResponse {
        log::debug!(
            "Hybrid search: '{}' (n_results: {})",
            query_text,
            options.n_results
        );

        let candidate_pool = options.n_results * 2;
        let semantic_options = QueryOptions {
            n_results: candidate_pool,
            document_ids: options.document_ids.clone(),
            ..QueryOptions::default()
        };

        let (semantic_results, semantic_error) =
            match self.semantic.run(query_text, &semantic_options).await {
                Ok(results) => (results, None),
                Err(err) => {
                    log::error!("Semantic leg failed for '{query_text}': {err}");
                    (Vec::new(), Some(err.to_string()))
                }
            };

        let (keyword_results, keyword_error) = match self
            .keyword
            .run(query_text, candidate_pool, options.document_ids.as_deref())
            .await
        {
            Ok(results) => (results, None),
            Err(err) => {
                log::error!("Keyword leg failed for '{query_text}': {err}");
                (Vec::new(), Some(err.to_string()))
            }
        };

        let error = match (semantic_error, keyword_error) {
            (Some(semantic), Some(_)) => Some(semantic),
            _ => None,
        };

        let semantic_count = semantic_results.len();
        let keyword_count = keyword_results.len();

        let mut results: Vec<QueryResult> =
            ScoreFusion::new(options.weights).fuse(semantic_results, keyword_results);
        results.truncate(options.n_results);

        log::debug!(
            "Hybrid search for '{}': {} semantic, {} keyword, {} fused",
            query_text,
            semantic_count,
            keyword_count,
            results.len()
        );

        HybridResponse {
            query: query_text.to_string(),
            total_found: results.len(),
            results,
            semantic_count,
            keyword_count,
            error,
        }
    }
}
