use crate::fusion::FusionWeights;
use docrag_vector_store::ChunkRecord;
use serde::{Deserialize, Serialize};

/// Which retrieval path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultSource {
    Semantic,
    Keyword,
    Both,
}

/// One ranked hit. Ephemeral: a copy of the stored chunk plus the relevance
/// score for this query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub record: ChunkRecord,

    /// Normalized relevance in `[0, 1]`, higher is more relevant
    pub confidence: f32,

    pub source: ResultSource,
}

/// Options for semantic search.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of results to return
    pub n_results: usize,

    /// Restrict the search to these documents; `None` searches the whole
    /// index
    pub document_ids: Option<Vec<String>>,

    /// Results below this confidence are dropped
    pub min_confidence: f32,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            n_results: 5,
            document_ids: None,
            min_confidence: 0.5,
        }
    }
}

/// Options for hybrid search.
#[derive(Debug, Clone)]
pub struct HybridOptions {
    pub n_results: usize,
    pub document_ids: Option<Vec<String>>,
    pub weights: FusionWeights,
}

impl Default for HybridOptions {
    fn default() -> Self {
        Self {
            n_results: 5,
            document_ids: None,
            weights: FusionWeights::default(),
        }
    }
}

impl HybridOptions {
    pub fn new(n_results: usize) -> Self {
        Self {
            n_results,
            ..Self::default()
        }
    }
}

/// Envelope for semantic search responses. Collaborator failures surface in
/// `error` with an empty result set; they are never raised to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResponse {
    pub query: String,
    pub results: Vec<QueryResult>,
    pub total_found: usize,

    /// Size of the document filter, when one was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searched_documents: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl QueryResponse {
    pub(crate) fn success(
        query: &str,
        results: Vec<QueryResult>,
        searched_documents: Option<usize>,
    ) -> Self {
        Self {
            query: query.to_string(),
            total_found: results.len(),
            results,
            searched_documents,
            error: None,
        }
    }

    pub(crate) fn failure(query: &str, error: String) -> Self {
        Self {
            query: query.to_string(),
            results: Vec::new(),
            total_found: 0,
            searched_documents: None,
            error: Some(error),
        }
    }
}

/// Envelope for hybrid search responses.
#[derive(Debug, Clone, Serialize)]
pub struct HybridResponse {
    pub query: String,
    pub results: Vec<QueryResult>,
    pub total_found: usize,

    /// Pre-fusion result count of the semantic leg
    pub semantic_count: usize,

    /// Pre-fusion result count of the keyword leg
    pub keyword_count: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
