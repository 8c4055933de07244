//! # DocRAG Indexer
//!
//! Write-side orchestration for the retrieval core: chunk a document, embed
//! every chunk in one batched call, and store records and vectors in the
//! vector index with a single bulk add. Removal deletes all and only the
//! chunks of one document.
//!
//! Public operations never raise collaborator errors; they log the failure
//! with the document id and return an outcome value with a success flag and
//! an optional error message.

mod error;
mod indexer;
mod outcome;
mod stats;

pub use error::{IndexerError, Result};
pub use indexer::DocumentIndexer;
pub use outcome::{ChunkListing, IndexOutcome, RemoveOutcome};
pub use stats::RetrievalStats;
