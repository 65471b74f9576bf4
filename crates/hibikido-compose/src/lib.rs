//! Text composer (C4): turns structured descriptions into the short,
//! budgeted embedding text that gets fed to the embedding provider.
//!
//! Composition is deterministic: clean -> optionally lemmatize -> take the
//! per-source budget -> concatenate -> enforce a global cap. The same
//! inputs always produce the same text, which matters because `rebuild_index`
//! (spec.md §6) re-derives embedding text from stored descriptions and must
//! reproduce the same rows it started with.

mod clean;
mod compose;
mod lemmatize;

pub use clean::clean_tokens;
pub use compose::{Composer, Source, GLOBAL_TOKEN_CAP};
pub use lemmatize::{Lemmatizer, PassthroughLemmatizer};
