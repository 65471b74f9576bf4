use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use hibikido_orchestrator::Orchestrator;
use hibikido_retrieval::RetrievalEngine;

use crate::config::SearchConfig;

/// Shared application state: the process-wide store/index/engine/
/// orchestrator handles spec.md §9's "Global state" note describes,
/// constructed once at startup and handed to both the inbound command
/// loop and the periodic tick driver.
#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<RetrievalEngine>,
    pub orchestrator: Arc<Orchestrator>,
    pub search: SearchConfig,
    manifest_seq: Arc<AtomicU64>,
}

impl ServerState {
    pub fn new(engine: Arc<RetrievalEngine>, orchestrator: Arc<Orchestrator>, search: SearchConfig) -> Self {
        Self {
            engine,
            orchestrator,
            search,
            manifest_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Next sequence index for an outgoing `/manifest` event.
    pub fn next_manifest_seq(&self) -> u64 {
        self.manifest_seq.fetch_add(1, Ordering::Relaxed)
    }

    /// `(recordings, segments, effects, presets, embeddings, active_niches, queued)`.
    pub fn stats(&self) -> (usize, usize, usize, usize, usize, usize, usize) {
        let store = self.engine.store();
        let (active_niches, queued) = self.orchestrator.stats();
        (
            store.recording_count(),
            store.segment_count(),
            store.effect_count(),
            store.preset_count(),
            self.engine.index().size(),
            active_niches,
            queued,
        )
    }
}
