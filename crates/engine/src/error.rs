use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Indexer error: {0}")]
    Indexer(#[from] docrag_indexer::IndexerError),
}
