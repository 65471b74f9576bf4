use crate::error::EmbedError;

/// Text -> 384-dim unit vector. Pure from the caller's perspective: the same
/// input text always produces the same output vector for the lifetime of a
/// given provider instance.
///
/// The only failure mode a conforming implementation should surface is
/// unavailability of the underlying model; that is expected to be detected
/// at construction time, not deep inside a hot `embed` call, but the
/// `Result` is kept here too since a remote/API-backed provider could fail
/// per-call.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed `text`, returning an L2-normalized vector of length [`Self::dim`].
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError>;

    /// The fixed dimensionality this provider produces.
    fn dim(&self) -> usize;
}
