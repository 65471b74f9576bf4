//! Chōwasha orchestrator (C6): a FIFO queue of candidate manifestations
//! admitted into a time-frequency niche table, per spec.md §4.6.
//!
//! This is the one component with no direct teacher analogue (the
//! teacher repo has no time-windowed admission scheduler); it is built
//! on the teacher's general concurrency idiom of one mutex-guarded state
//! struct with short critical sections, and an injectable `Clock` so the
//! timing-sensitive test scenarios in spec.md §8 don't need to sleep
//! real wall-clock time.

mod clock;
mod config;
mod error;
mod orchestrator;
mod overlap;
mod types;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OrchestratorConfig;
pub use error::OrchestratorError;
pub use orchestrator::Orchestrator;
pub use overlap::log_overlap;
pub use types::ManifestPayload;
