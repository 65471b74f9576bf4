//! Document store (C3): schema-validated collections for recordings,
//! segmentations, segments, effects, presets, and performances, with
//! referential integrity enforced on insert and row-based reverse lookup
//! for the vector index's row namespace (spec.md §3, §4.3, §9).

mod backend;
mod error;
mod store;
mod types;

pub use backend::{InMemoryBackend, StoreBackend};
#[cfg(feature = "mongo")]
pub use backend::MongoBackend;
pub use error::StoreError;
pub use store::{
    DocumentStore, NewEffect, NewPreset, NewRecording, NewSegment, NewSegmentation,
};
pub use types::{
    Collection, Effect, Invocation, Parameter, Performance, Preset, Recording, Segment,
    Segmentation,
};
