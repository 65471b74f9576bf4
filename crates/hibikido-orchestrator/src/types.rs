use std::time::Instant;

/// Full payload to hand back to the server for a `/manifest` event,
/// captured at enqueue time (spec.md §3's "Queued Manifestation"). The
/// orchestrator holds no reference back to the document store beyond
/// this snapshot.
#[derive(Debug, Clone)]
pub struct ManifestPayload {
    pub collection: &'static str,
    pub score: f32,
    pub path: String,
    pub description: String,
    pub start: f32,
    pub end: f32,
    pub parameters_json: String,
}

/// A candidate waiting in the FIFO queue for admission.
#[derive(Debug, Clone)]
pub(crate) struct QueuedManifestation {
    pub sound_id: String,
    pub payload: ManifestPayload,
    pub freq_low: f32,
    pub freq_high: f32,
    pub duration_seconds: f32,
    #[allow(dead_code)]
    pub enqueue_time: Instant,
}

/// An active time-frequency niche, ephemeral and never persisted.
#[derive(Debug, Clone)]
pub(crate) struct Niche {
    #[allow(dead_code)]
    pub start: Instant,
    pub end: Instant,
    pub freq_low: f32,
    pub freq_high: f32,
}
