use thiserror::Error;

/// Errors produced by the document store. Variants map 1:1 onto spec.md §7's
/// taxonomy items for this component: conflict, dangling reference, invalid
/// document, and backend failures.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum StoreError {
    #[error("duplicate {kind} key: {key}")]
    Conflict { kind: &'static str, key: String },

    #[error("dangling reference: {0}")]
    DanglingReference(String),

    #[error("invalid document: {0}")]
    Validation(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
