use hibikido_store::{Preset, Segment};

/// Caller-supplied fields for `ingest_segment`. `row` is assigned internally.
#[derive(Debug, Clone)]
pub struct SegmentFields {
    pub recording_path: String,
    pub segmentation_id: String,
    pub start: f32,
    pub end: f32,
    pub description: String,
    pub freq_low: Option<f32>,
    pub freq_high: Option<f32>,
    pub duration_seconds: Option<f32>,
}

/// Caller-supplied fields for `ingest_preset`.
#[derive(Debug, Clone)]
pub struct PresetFields {
    pub effect_path: String,
    pub parameters: Vec<(String, serde_json::Value)>,
    pub description: String,
}

/// Caller-supplied fields for `ingest_recording`.
#[derive(Debug, Clone)]
pub struct RecordingFields {
    pub path: String,
    pub description: String,
}

/// Caller-supplied fields for `ingest_effect`.
#[derive(Debug, Clone)]
pub struct EffectFields {
    pub path: String,
    pub name: String,
    pub description: String,
}

/// One search result: the owning collection, its row, its score, and the
/// resolved document.
#[derive(Debug, Clone)]
pub enum Hit {
    Segment { row: usize, score: f32, segment: Segment },
    Preset { row: usize, score: f32, preset: Preset },
}

impl Hit {
    pub fn score(&self) -> f32 {
        match self {
            Hit::Segment { score, .. } => *score,
            Hit::Preset { score, .. } => *score,
        }
    }

    pub fn row(&self) -> usize {
        match self {
            Hit::Segment { row, .. } => *row,
            Hit::Preset { row, .. } => *row,
        }
    }
}

/// Outcome of `rebuild_index`: how many documents were successfully
/// re-embedded and reassigned, and which ones failed (kept their previous
/// row, recorded here rather than aborting the whole rebuild). See spec.md
/// §7's "atomic per-document" requirement.
#[derive(Debug, Clone, Default)]
pub struct RebuildReport {
    pub rebuilt: usize,
    pub failed: Vec<(String, String)>,
}
