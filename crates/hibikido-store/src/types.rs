//! Schema types for the five persisted collections plus the performance log.
//! Field shapes follow spec.md §3 exactly; nothing here is derived from the
//! teacher beyond the general "plain data struct + serde derive" convention
//! already used throughout the pack.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Immutable root document. Referenced by segments via `path`, never mutated
/// after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recording {
    pub id: String,
    pub path: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A named method/run that produced a batch of segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segmentation {
    pub id: String,
    pub method: String,
    pub parameters: JsonValue,
    pub description: String,
}

/// A slice of a recording, owning exactly one vector-index row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Segment {
    pub id: String,
    pub recording_path: String,
    pub segmentation_id: String,
    pub start: f32,
    pub end: f32,
    pub description: String,
    pub embedding_text: String,
    pub row: usize,
    pub freq_low: Option<f32>,
    pub freq_high: Option<f32>,
    pub duration_seconds: Option<f32>,
    pub created_at: DateTime<Utc>,
}

/// A processing tool referenced by presets via `path`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Effect {
    pub id: String,
    pub path: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// A single effect parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: JsonValue,
}

/// A named configuration of an effect, owning exactly one vector-index row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    pub id: String,
    pub effect_path: String,
    pub parameters: Vec<Parameter>,
    pub description: String,
    pub embedding_text: String,
    pub row: usize,
    pub created_at: DateTime<Utc>,
}

/// A single invocation in a performance's append-only log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Invocation {
    pub raw_text: String,
    pub matched_segment_id: Option<String>,
    pub matched_effect_id: Option<String>,
    pub time_offset_seconds: f32,
}

/// A session: a date plus its append-only invocation log. Peripheral to the
/// core retrieval system, specified only as a sink.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Performance {
    pub id: String,
    pub date: DateTime<Utc>,
    pub invocations: Vec<Invocation>,
}

/// Which collection a vector-index row belongs to, so `find_by_row` is one
/// lookup instead of probing segments then presets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Collection {
    Segment,
    Preset,
}
