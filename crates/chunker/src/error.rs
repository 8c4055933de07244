use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkerError>;

#[derive(Error, Debug)]
pub enum ChunkerError {
    #[error("Invalid chunker configuration: {0}")]
    InvalidConfig(String),
}
