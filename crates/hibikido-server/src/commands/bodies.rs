use serde::Deserialize;

/// JSON blob carried by `/add_recording`'s second argument.
#[derive(Debug, Deserialize)]
pub struct RecordingBody {
    pub description: String,
}

/// JSON blob carried by `/add_effect`'s second argument.
#[derive(Debug, Deserialize)]
pub struct EffectBody {
    pub name: String,
    pub description: String,
}

/// JSON blob carried by `/add_segment`'s second argument. `description` is
/// a separate leading OSC argument, not part of this blob (spec.md §6).
#[derive(Debug, Deserialize)]
pub struct SegmentBody {
    pub source_path: String,
    pub start: f32,
    pub end: f32,
    pub segmentation_id: String,
    #[serde(default)]
    pub freq_low: Option<f32>,
    #[serde(default)]
    pub freq_high: Option<f32>,
    #[serde(default)]
    pub duration: Option<f32>,
}

/// JSON blob carried by `/add_preset`'s second argument. `description` is
/// a separate leading OSC argument, not part of this blob (spec.md §6).
#[derive(Debug, Deserialize)]
pub struct PresetBody {
    pub effect_path: String,
    #[serde(default)]
    pub parameters: Vec<(String, serde_json::Value)>,
}
