//! # DocRAG Chunker
//!
//! Deterministic, boundary-aware text splitting for document indexing.
//!
//! The splitter advances a fixed-size character window through the input and
//! prefers to cut just after a sentence terminal, falling back to the nearest
//! whitespace, and finally to a hard cut at the window edge. Consecutive
//! chunks overlap by a configurable number of characters so that context is
//! not lost at chunk borders.
//!
//! ## Example
//!
//! ```rust
//! use docrag_chunker::{ChunkerConfig, TextSplitter};
//!
//! let splitter = TextSplitter::new(ChunkerConfig::default()).unwrap();
//! let chunks = splitter.split("First sentence. Second sentence.");
//! assert_eq!(chunks.len(), 1);
//! ```

mod config;
mod error;
mod splitter;

pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use splitter::TextSplitter;
