use thiserror::Error;

pub type Result<T> = std::result::Result<T, SearchError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Vector store error: {0}")]
    VectorStore(#[from] docrag_vector_store::VectorStoreError),

    #[error("{0}")]
    Other(String),
}
