use serde::{Deserialize, Serialize};

/// Tuning knobs for the orchestrator, per spec.md §4.6. Mirrors the
/// config tree's `orchestrator` section (spec.md §6), though only
/// `overlap_threshold` and `time_precision` are exposed there; the rest
/// are implementation defaults a deployment rarely needs to touch.
/// `time_precision` is spec.md §6's wire name for the tick interval;
/// kept as `tick_interval_seconds` internally since that's what it holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    pub overlap_threshold: f32,
    #[serde(rename = "time_precision")]
    pub tick_interval_seconds: f64,
    pub max_admits_per_tick: usize,
    pub default_duration_seconds: f32,
    pub default_freq_low: f32,
    pub default_freq_high: f32,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            overlap_threshold: 0.2,
            tick_interval_seconds: 0.1,
            max_admits_per_tick: 5,
            default_duration_seconds: 1.0,
            default_freq_low: 200.0,
            default_freq_high: 2000.0,
        }
    }
}
