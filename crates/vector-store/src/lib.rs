//! # DocRAG Vector Store
//!
//! Chunk storage contracts and reference implementations for the retrieval
//! core.
//!
//! The core talks to two external capabilities, both expressed as traits so
//! that production deployments can swap in a remote service:
//!
//! - [`EmbeddingProvider`] maps text to fixed-length vectors. One provider
//!   instance is shared between indexing and querying; mixing vector spaces
//!   from different providers in one index is a correctness bug, not a
//!   quality regression.
//! - [`VectorIndex`] stores chunk records with their vectors and supports
//!   nearest-neighbor queries, metadata-filtered reads, and deletion.
//!
//! ## Architecture
//!
//! ```text
//! ChunkRecord[] + Vec<f32>[]
//!     │
//!     ├──> EmbeddingProvider (batch embed, order-preserving)
//!     │
//!     └──> VectorIndex
//!            ├─> query(vector, k, filter) — ascending cosine distance
//!            ├─> get(filter) / delete(ids) / count()
//!            └─> snapshot persistence (implementation-owned)
//! ```
//!
//! [`HashingEmbedder`] and [`MemoryVectorIndex`] are the in-process reference
//! implementations used by the test suites and by offline deployments.

mod embedder;
mod error;
mod index;
mod memory;
mod types;

pub use embedder::{EmbeddingProvider, HashingEmbedder};
pub use error::{Result, VectorStoreError};
pub use index::{ChunkFilter, VectorIndex};
pub use memory::MemoryVectorIndex;
pub use types::{ChunkRecord, ScoredChunk};
