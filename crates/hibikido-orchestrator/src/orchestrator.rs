use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use tracing::{debug, instrument};

use crate::clock::{Clock, SystemClock};
use crate::config::OrchestratorConfig;
use crate::overlap::log_overlap;
use crate::types::{ManifestPayload, Niche, QueuedManifestation};

struct State {
    queue: VecDeque<QueuedManifestation>,
    niches: HashMap<String, Niche>,
}

/// Chōwasha (C6): a FIFO queue of candidate manifestations admitted into a
/// time-frequency niche table, one mutex-guarded state struct mutated by
/// short critical sections — the same shape the teacher's `ServerState`
/// uses for its `DashMap` rate limiter, adapted to a single `Mutex` since
/// the queue and niche table must be updated together atomically.
///
/// `enqueue` runs on the invocation path; `tick` runs on the periodic
/// worker. Neither ever returns an error: a candidate that cannot be
/// admitted simply stays queued (spec.md §7 item 6).
pub struct Orchestrator {
    state: Mutex<State>,
    clock: Arc<dyn Clock>,
    config: OrchestratorConfig,
}

impl Orchestrator {
    pub fn new(config: OrchestratorConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(State {
                queue: VecDeque::new(),
                niches: HashMap::new(),
            }),
            clock,
            config,
        }
    }

    pub fn with_system_clock(config: OrchestratorConfig) -> Self {
        Self::new(config, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Appends a candidate to the FIFO queue, filling missing frequency
    /// bounds and duration from config defaults. Never rejects.
    #[instrument(skip(self, payload))]
    pub fn enqueue(
        &self,
        sound_id: String,
        payload: ManifestPayload,
        freq_low: Option<f32>,
        freq_high: Option<f32>,
        duration_seconds: Option<f32>,
    ) {
        let enqueue_time = self.clock.now();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.queue.push_back(QueuedManifestation {
            sound_id,
            payload,
            freq_low: freq_low.unwrap_or(self.config.default_freq_low),
            freq_high: freq_high.unwrap_or(self.config.default_freq_high),
            duration_seconds: duration_seconds.unwrap_or(self.config.default_duration_seconds),
            enqueue_time,
        });
    }

    /// Drops expired niches, then admits up to `max_admits_per_tick`
    /// candidates from the head of the queue in order. A candidate whose
    /// sound id is already active is discarded silently (spec.md §4.6)
    /// without counting against the admission budget. The first
    /// remaining candidate that conflicts with an active niche blocks the
    /// tick: it is left at the head rather than skipped (head-blocking
    /// FIFO, spec.md §9).
    #[instrument(skip(self))]
    pub fn tick(&self) -> Vec<ManifestPayload> {
        let now = self.clock.now();
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let expired: Vec<String> = state
            .niches
            .iter()
            .filter(|(_, niche)| now >= niche.end)
            .map(|(id, _)| id.clone())
            .collect();
        for id in expired {
            state.niches.remove(&id);
            debug!(sound_id = %id, "niche expired");
        }

        let mut admissions = Vec::new();
        while admissions.len() < self.config.max_admits_per_tick {
            let Some(head) = state.queue.front() else {
                break;
            };

            if state.niches.contains_key(&head.sound_id) {
                let duplicate = state.queue.pop_front().expect("front checked above");
                debug!(sound_id = %duplicate.sound_id, "duplicate sound id already active, discarding");
                continue;
            }

            let conflict = state.niches.values().any(|niche| {
                log_overlap(head.freq_low, head.freq_high, niche.freq_low, niche.freq_high)
                    > self.config.overlap_threshold
            });
            if conflict {
                break;
            }

            let candidate = state.queue.pop_front().expect("front checked above");
            let end = now + std::time::Duration::from_secs_f32(candidate.duration_seconds.max(0.0));
            state.niches.insert(
                candidate.sound_id.clone(),
                Niche {
                    start: now,
                    end,
                    freq_low: candidate.freq_low,
                    freq_high: candidate.freq_high,
                },
            );
            admissions.push(candidate.payload);
        }

        admissions
    }

    /// `(active_niche_count, queue_length)`.
    pub fn stats(&self) -> (usize, usize) {
        let state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        (state.niches.len(), state.queue.len())
    }
}
