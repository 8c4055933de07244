use crate::error::Result;
use crate::types::{ChunkRecord, ScoredChunk};
use async_trait::async_trait;

/// Metadata filter for index reads and queries.
///
/// `document_ids: None` selects the whole index; `Some(ids)` restricts to
/// chunks whose `document_id` is a member of the set.
#[derive(Debug, Clone, Default)]
pub struct ChunkFilter {
    pub document_ids: Option<Vec<String>>,
}

impl ChunkFilter {
    /// Match every chunk in the index.
    pub fn any() -> Self {
        Self::default()
    }

    /// Restrict to the given documents.
    pub fn documents(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            document_ids: Some(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Build a filter from an optional document restriction.
    pub fn from_document_ids(ids: Option<&[String]>) -> Self {
        Self {
            document_ids: ids.map(<[String]>::to_vec),
        }
    }

    pub fn matches(&self, record: &ChunkRecord) -> bool {
        match &self.document_ids {
            Some(ids) => ids.iter().any(|id| *id == record.document_id),
            None => true,
        }
    }

    /// Number of documents the filter restricts to, if any.
    pub fn restricted_len(&self) -> Option<usize> {
        self.document_ids.as_ref().map(Vec::len)
    }
}

/// External nearest-neighbor store for chunk records and their vectors.
///
/// The retrieval core depends on this minimal contract and nothing else;
/// persistence format and index structure are implementation-owned.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Bulk-add records with their vectors, one vector per record.
    ///
    /// The add is all-or-nothing: no record is visible if any part of the
    /// batch is rejected.
    async fn add(&self, records: Vec<ChunkRecord>, vectors: Vec<Vec<f32>>) -> Result<()>;

    /// Nearest neighbors of `vector`, ranked by ascending cosine distance.
    async fn query(
        &self,
        vector: &[f32],
        k: usize,
        filter: &ChunkFilter,
    ) -> Result<Vec<ScoredChunk>>;

    /// All records matching `filter`, in no particular order.
    async fn get(&self, filter: &ChunkFilter) -> Result<Vec<ChunkRecord>>;

    /// Delete by chunk id, returning how many records were removed.
    async fn delete(&self, ids: &[String]) -> Result<usize>;

    /// Total number of stored chunks.
    async fn count(&self) -> Result<usize>;
}
