//! # DocRAG Engine
//!
//! The caller-facing surface of the retrieval core. A [`RetrievalEngine`] is
//! constructed once at process start with an embedding provider and a vector
//! index, then shared by reference for the life of the process; document
//! services call its six operations and never talk to the collaborators
//! directly.
//!
//! ## Example
//!
//! ```no_run
//! use docrag_engine::{QueryOptions, RetrievalEngine};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = RetrievalEngine::with_defaults()?;
//!
//!     let outcome = engine
//!         .index_document("doc-1", "Retrieval turns text into answers.", None)
//!         .await;
//!     assert!(outcome.success);
//!
//!     let response = engine
//!         .query("how does retrieval work", &QueryOptions::default())
//!         .await;
//!     for result in &response.results {
//!         println!("{}: {:.3}", result.record.chunk_id, result.confidence);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod engine;
mod error;

pub use engine::RetrievalEngine;
pub use error::{EngineError, Result};

// Re-export the operation vocabulary so callers depend on one crate.
pub use docrag_chunker::ChunkerConfig;
pub use docrag_indexer::{ChunkListing, IndexOutcome, RemoveOutcome, RetrievalStats};
pub use docrag_search::{
    FusionWeights, HybridOptions, HybridResponse, QueryOptions, QueryResponse, QueryResult,
    ResultSource,
};
pub use docrag_vector_store::{
    ChunkFilter, ChunkRecord, EmbeddingProvider, HashingEmbedder, MemoryVectorIndex, VectorIndex,
};
