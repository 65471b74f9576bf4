use thiserror::Error;

/// Errors surfaced by an [`crate::EmbeddingProvider`].
///
/// Per the embedding provider's contract it fails only when the underlying
/// model is unavailable; that is a startup concern, not a per-call one, but
/// the type stays open (`#[non_exhaustive]`) so a real model backend can add
/// inference-time variants without a breaking change.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum EmbedError {
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("failed to load model assets: {0}")]
    ModelLoad(String),
    #[error("inference failed: {0}")]
    Inference(String),
}
