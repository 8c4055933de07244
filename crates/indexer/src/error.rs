use thiserror::Error;

pub type Result<T> = std::result::Result<T, IndexerError>;

#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("Chunker error: {0}")]
    Chunker(#[from] docrag_chunker::ChunkerError),

    #[error("Vector store error: {0}")]
    VectorStore(#[from] docrag_vector_store::VectorStoreError),

    #[error(
        "Non-contiguous chunk sequence for document {document_id}: expected index {expected}, found {actual}"
    )]
    CorruptSequence {
        document_id: String,
        expected: usize,
        actual: usize,
    },
}
