//! # DocRAG Search
//!
//! Read-side retrieval over an indexed document corpus: semantic search with
//! a confidence threshold, literal keyword matching, and a weighted
//! score-fusion ranker combining the two.
//!
//! ## Architecture
//!
//! ```text
//! query text
//!     │
//!     ├──> SemanticSearch ── embed ──> VectorIndex.query
//!     │        └─> confidence = 1 - cosine distance, threshold filter
//!     │
//!     ├──> KeywordSearch ──> VectorIndex.get ──> term frequency scan
//!     │
//!     └──> HybridSearch
//!            └─> ScoreFusion: combined = s·w_s' + k·w_k'
//! ```
//!
//! Confidences are always in `[0, 1]`; the fusion assumes both scales are
//! comparable, which the clamping in each leg guarantees.

mod error;
mod fusion;
mod hybrid;
mod keyword;
mod semantic;
mod types;

pub use error::{Result, SearchError};
pub use fusion::{FusionWeights, ScoreFusion};
pub use hybrid::HybridSearch;
pub use keyword::KeywordSearch;
pub use semantic::SemanticSearch;
pub use types::{
    HybridOptions, HybridResponse, QueryOptions, QueryResponse, QueryResult, ResultSource,
};
