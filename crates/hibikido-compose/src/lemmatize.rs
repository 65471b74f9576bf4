/// Strategy hook for lemmatizing cleaned tokens. Optional per spec.md §4.4 —
/// when absent, tokens pass through unchanged.
///
/// The availability of a lemmatizer is fixed for the lifetime of a
/// [`crate::Composer`] (it is supplied at construction, not swapped at
/// call time), since spec.md §9 calls changing it mid-run "undefined" and
/// requires a `rebuild_index` to take effect.
pub trait Lemmatizer: Send + Sync {
    fn lemmatize(&self, token: &str) -> String;
}

/// Leaves tokens unchanged. Used when no lemmatizer is configured.
#[derive(Debug, Default)]
pub struct PassthroughLemmatizer;

impl Lemmatizer for PassthroughLemmatizer {
    fn lemmatize(&self, token: &str) -> String {
        token.to_string()
    }
}
