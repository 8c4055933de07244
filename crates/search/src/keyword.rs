use crate::error::Result;
use crate::types::{QueryOptions, QueryResponse, QueryResult, ResultSource};
use docrag_vector_store::{ChunkFilter, VectorIndex};
use std::sync::Arc;

/// Literal term-frequency search over the stored chunk texts.
///
/// Terms are the lower-cased whitespace tokens of the query; no stemming and
/// no stop-word removal. A chunk's score is the summed substring occurrence
/// count of every term, and `confidence = min(score / num_terms, 1)` — a
/// crude normalization, deliberately simpler than TF-IDF or BM25.
pub struct KeywordSearch {
    index: Arc<dyn VectorIndex>,
}

impl KeywordSearch {
    pub fn new(index: Arc<dyn VectorIndex>) -> Self {
        Self { index }
    }

    /// Run a keyword query, recovering collaborator failures into the
    /// response envelope. `min_confidence` in `options` is ignored; ranking
    /// uses raw scores.
    pub async fn search(&self, query_text: &str, options: &QueryOptions) -> QueryResponse {
        match self
            .run(
                query_text,
                options.n_results,
                options.document_ids.as_deref(),
            )
            .await
        {
            Ok(results) => QueryResponse::success(
                query_text,
                results,
                options.document_ids.as_ref().map(Vec::len),
            ),
            Err(err) => {
                log::error!("Keyword search failed for '{query_text}': {err}");
                QueryResponse::failure(query_text, err.to_string())
            }
        }
    }

    pub(crate) async fn run(
        &self,
        query_text: &str,
        n_results: usize,
        document_ids: Option<&[String]>,
    ) -> Result<Vec<QueryResult>> {
        let terms: Vec<String> = query_text
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let filter = ChunkFilter::from_document_ids(document_ids);
        let records = self.index.get(&filter).await?;

        let mut scored: Vec<(usize, QueryResult)> = Vec::new();
        for record in records {
            let haystack = record.text.to_lowercase();
            let score: usize = terms
                .iter()
                .map(|term| haystack.matches(term.as_str()).count())
                .sum();
            if score == 0 {
                continue;
            }

            let confidence = (score as f32 / terms.len() as f32).min(1.0);
            scored.push((
                score,
                QueryResult {
                    record,
                    confidence,
                    source: ResultSource::Keyword,
                },
            ));
        }

        // Rank by raw score, not the clamped confidence; ties broken by
        // chunk id since the index returns chunks unordered.
        scored.sort_by(|a, b| {
            b.0.cmp(&a.0)
                .then_with(|| a.1.record.chunk_id.cmp(&b.1.record.chunk_id))
        });
        scored.truncate(n_results);

        log::debug!(
            "Keyword search for '{}' matched {} chunks",
            query_text,
            scored.len()
        );
        Ok(scored.into_iter().map(|(_, result)| result).collect())
    }
}
