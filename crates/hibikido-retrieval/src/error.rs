use thiserror::Error;

use hibikido_embed::EmbedError;
use hibikido_index::IndexError;
use hibikido_store::StoreError;

/// Errors surfaced by the retrieval engine. Never silently dropped — every
/// caller (the server's command handlers) maps one of these to a wire
/// `/error` per spec.md §7.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("embedding failed: {0}")]
    EmbeddingFailed(#[from] EmbedError),

    #[error("vector index full")]
    IndexFull,

    #[error("persist failed: {0}")]
    PersistFailed(String),
}

impl From<StoreError> for RetrievalError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DanglingReference(msg) => RetrievalError::NotFound(msg),
            other => RetrievalError::PersistFailed(other.to_string()),
        }
    }
}

impl From<IndexError> for RetrievalError {
    fn from(err: IndexError) -> Self {
        RetrievalError::PersistFailed(err.to_string())
    }
}
