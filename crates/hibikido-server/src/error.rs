use thiserror::Error;

use hibikido_index::IndexError;
use hibikido_retrieval::RetrievalError;
use hibikido_store::StoreError;

/// Errors the command dispatcher can produce. Every variant maps to a
/// single `/error` OSC message whose text is `{code}: {message}` — the
/// same code-plus-message shape the teacher's `ErrorResponse`/`ErrorDetail`
/// pair uses for its JSON error body (`crates/server/src/error.rs`),
/// adapted to one OSC string argument since this transport has no
/// structured body.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("bad argument: {0}")]
    BadRequest(String),

    #[error("{0}")]
    Retrieval(#[from] RetrievalError),

    #[error("index error: {0}")]
    Index(#[from] IndexError),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("startup failed: {0}")]
    Startup(String),
}

impl ServerError {
    /// Wire error code, spec.md §7's taxonomy items 1-4 collapsed onto
    /// this transport's single string argument.
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "validation",
            ServerError::Retrieval(RetrievalError::NotFound(_)) => "dangling_reference",
            ServerError::Retrieval(RetrievalError::EmbeddingFailed(_)) => "infra",
            ServerError::Retrieval(RetrievalError::IndexFull) => "infra",
            ServerError::Retrieval(RetrievalError::PersistFailed(_)) => "infra",
            ServerError::Index(_) => "infra",
            ServerError::Store(StoreError::Conflict { .. }) => "conflict",
            ServerError::Store(StoreError::DanglingReference(_)) => "dangling_reference",
            ServerError::Store(StoreError::Validation(_)) => "validation",
            ServerError::Store(StoreError::Backend(_)) => "infra",
            ServerError::Startup(_) => "fatal",
            // `StoreError` is `#[non_exhaustive]`; any future variant not
            // enumerated above is an infra-class failure until classified.
            ServerError::Store(_) => "infra",
        }
    }

    /// `{code}: {message}`, the text sent as the single `/error` argument.
    pub fn wire_message(&self) -> String {
        format!("{}: {}", self.code(), self)
    }
}
