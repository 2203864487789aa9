use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartchunkError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid chunk parameters: chunk_overlap ({chunk_overlap}) must be smaller than chunk_size ({chunk_size})")]
    InvalidChunkParams {
        chunk_size: usize,
        chunk_overlap: usize,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SmartchunkError>;
