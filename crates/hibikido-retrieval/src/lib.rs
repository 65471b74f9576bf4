//! Retrieval engine (C5): binds the embedding provider, vector index,
//! document store and text composer (C1-C4) into ingest and search, per
//! spec.md §4.5.

mod engine;
mod error;
mod types;

pub use engine::RetrievalEngine;
pub use error::RetrievalError;
pub use types::{EffectFields, Hit, PresetFields, RebuildReport, RecordingFields, SegmentFields};
