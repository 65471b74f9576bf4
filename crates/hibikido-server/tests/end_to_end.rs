//! End-to-end scenarios from spec.md §8, exercised against the command
//! dispatcher directly (no real UDP socket) so the timing-sensitive cases
//! can use `hibikido_orchestrator::ManualClock` instead of sleeping real
//! wall-clock time.

use std::sync::Arc;
use std::time::Duration;

use rosc::{OscMessage, OscType};

use hibikido_compose::Composer;
use hibikido_embed::{EmbedConfig, EmbeddingProvider, StubEmbeddingProvider};
use hibikido_index::VectorIndex;
use hibikido_orchestrator::{ManifestPayload, ManualClock, Orchestrator, OrchestratorConfig};
use hibikido_retrieval::RetrievalEngine;
use hibikido_server::commands::{self, Command, Outcome};
use hibikido_server::config::SearchConfig;
use hibikido_server::state::ServerState;
use hibikido_store::DocumentStore;

fn harness(config: OrchestratorConfig) -> (ServerState, Arc<ManualClock>) {
    let store = Arc::new(DocumentStore::default());
    let index = Arc::new(VectorIndex::new(384));
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(StubEmbeddingProvider::new(&EmbedConfig::default()));
    let engine = Arc::new(RetrievalEngine::new(store, index, embedder, Composer::default()));

    let clock = Arc::new(ManualClock::new());
    let orchestrator = Arc::new(Orchestrator::new(config, clock.clone()));

    let state = ServerState::new(
        engine,
        orchestrator,
        SearchConfig {
            top_k: 10,
            min_score: 0.0,
        },
    );
    (state, clock)
}

fn osc_string(addr: &str, args: Vec<&str>) -> OscMessage {
    OscMessage {
        addr: addr.to_string(),
        args: args.into_iter().map(|s| OscType::String(s.to_string())).collect(),
    }
}

fn add_recording(state: &ServerState, path: &str, description: &str) {
    let body = serde_json::json!({ "description": description }).to_string();
    let message = osc_string("/add_recording", vec![path, &body]);
    let command = commands::decode(&message).unwrap();
    let outcome = commands::handle(state, command).unwrap();
    assert!(matches!(outcome, Outcome::Confirm(_)));
}

fn invoke(state: &ServerState, text: &str) -> usize {
    let message = osc_string("/invoke", vec![text]);
    let command = commands::decode(&message).unwrap();
    match commands::handle(state, command).unwrap() {
        Outcome::Confirm(count) => count.parse().unwrap(),
        other => panic!("expected Confirm, got a different outcome: {other:?}"),
    }
}

fn payload(path: &str) -> ManifestPayload {
    ManifestPayload {
        collection: "segments",
        score: 0.9,
        path: path.to_string(),
        description: "test tone".to_string(),
        start: 0.0,
        end: 1.0,
        parameters_json: "[]".to_string(),
    }
}

#[test]
fn ingest_then_search_queues_one_candidate() {
    let (mut state, _clock) = harness(OrchestratorConfig::default());
    // The stub embedder has no locality, so a raw query string isn't
    // guaranteed to score non-negative against the one indexed segment;
    // drop min_score so this test exercises "does invoke enqueue the
    // single indexed hit" rather than depending on embedder correlation.
    state.search.min_score = -1.0;
    add_recording(&state, "sounds/a.wav", "forest wind");

    let queued = invoke(&state, "forest wind");
    assert_eq!(queued, 1);
    assert_eq!(state.orchestrator.stats(), (0, 1));
}

#[test]
fn top_k_zero_queues_nothing() {
    let (mut state, _clock) = harness(OrchestratorConfig::default());
    state.search.top_k = 0;
    add_recording(&state, "sounds/a.wav", "forest wind");
    let queued = invoke(&state, "forest wind");
    assert_eq!(queued, 0);
}

#[test]
fn rebuild_index_preserves_retrievability() {
    let (state, _clock) = harness(OrchestratorConfig::default());
    let mut descriptions = Vec::new();
    for i in 0..20 {
        let description = format!("distinct timbre number {i}");
        add_recording(&state, &format!("sounds/{i}.wav"), &description);
        descriptions.push(description);
    }

    let message = osc_string("/rebuild_index", vec![]);
    let command = commands::decode(&message).unwrap();
    let outcome = commands::handle(&state, command).unwrap();
    assert!(matches!(outcome, Outcome::Confirm(_)));

    // `min_score: -1.0` rather than `0.0`: the stub embedder has no
    // locality, so a raw description string isn't guaranteed to score
    // non-negative against its own (fuller, composed) embedding text. This
    // loop only checks that rebuild left the index searchable at all, not
    // rank-1 identity (see hibikido-retrieval's own rebuild round-trip test
    // for that, which drives the query with the segment's own embedding
    // text instead).
    for description in descriptions {
        let hits = state.engine.search(&description, 1, -1.0).unwrap();
        assert_eq!(hits.len(), 1);
    }
}

#[test]
fn stats_reports_the_seven_field_tuple() {
    let (state, _clock) = harness(OrchestratorConfig::default());
    add_recording(&state, "sounds/a.wav", "forest wind");

    let message = osc_string("/stats", vec![]);
    let command = commands::decode(&message).unwrap();
    match commands::handle(&state, command).unwrap() {
        Outcome::Stats((recordings, segments, effects, presets, embeddings, active, queued)) => {
            assert_eq!(recordings, 1);
            assert_eq!(segments, 1);
            assert_eq!(effects, 0);
            assert_eq!(presets, 0);
            assert_eq!(embeddings, 1);
            assert_eq!(active, 0);
            assert_eq!(queued, 0);
        }
        other => panic!("expected Stats, got {other:?}"),
    }
}

#[test]
fn unknown_command_is_rejected_before_dispatch() {
    let message = osc_string("/not_a_real_address", vec![]);
    assert!(commands::decode(&message).is_err());
}

/// Frequency-conflict scenario from spec.md §8 scenario 2, driven at the
/// `ServerState`/orchestrator layer directly (the retrieval/search half is
/// already covered by `ingest_then_search_queues_one_candidate` and by
/// `hibikido-retrieval`'s own tests).
#[test]
fn frequency_conflict_blocks_head_until_expiry() {
    let (state, clock) = harness(OrchestratorConfig::default());
    state
        .orchestrator
        .enqueue("seg1".to_string(), payload("sounds/seg1.wav"), Some(500.0), Some(1000.0), Some(2.0));
    state
        .orchestrator
        .enqueue("seg2".to_string(), payload("sounds/seg2.wav"), Some(600.0), Some(900.0), Some(1.0));

    let first_tick = state.orchestrator.tick();
    assert_eq!(first_tick.len(), 1);
    assert_eq!(first_tick[0].path, "sounds/seg1.wav");

    let blocked_tick = state.orchestrator.tick();
    assert!(blocked_tick.is_empty());

    clock.advance(Duration::from_secs_f32(2.1));
    let after_expiry = state.orchestrator.tick();
    assert_eq!(after_expiry.len(), 1);
    assert_eq!(after_expiry[0].path, "sounds/seg2.wav");
}

/// FIFO-across-invocations scenario from spec.md §8 scenario 4.
#[test]
fn fifo_across_invocations_preserves_order() {
    let (state, _clock) = harness(OrchestratorConfig::default());
    for (i, (lo, hi)) in [(100.0, 110.0), (200.0, 210.0), (300.0, 310.0)].into_iter().enumerate() {
        let path = format!("sounds/q1_{i}.wav");
        state.orchestrator.enqueue(format!("q1-{i}"), payload(&path), Some(lo), Some(hi), Some(0.5));
    }
    for (i, (lo, hi)) in [(400.0, 410.0), (500.0, 510.0)].into_iter().enumerate() {
        let path = format!("sounds/q2_{i}.wav");
        state.orchestrator.enqueue(format!("q2-{i}"), payload(&path), Some(lo), Some(hi), Some(0.5));
    }

    let admitted = state.orchestrator.tick();
    assert_eq!(admitted.len(), 5);
    assert!(admitted[0].path.starts_with("sounds/q1_"));
    assert!(admitted[3].path.starts_with("sounds/q2_"));
}

/// Graceful-shutdown scenario from spec.md §8 scenario 6: a candidate that
/// cannot be admitted stays queued, un-manifested, across `/stop`.
#[test]
fn stop_command_reports_outcome_without_admitting_blocked_candidate() {
    let (state, _clock) = harness(OrchestratorConfig::default());
    state
        .orchestrator
        .enqueue("seg1".to_string(), payload("sounds/seg1.wav"), Some(500.0), Some(1000.0), Some(5.0));
    state
        .orchestrator
        .enqueue("seg2".to_string(), payload("sounds/seg2.wav"), Some(600.0), Some(900.0), Some(5.0));
    state.orchestrator.tick();

    let message = osc_string("/stop", vec![]);
    let command = commands::decode(&message).unwrap();
    let outcome = commands::handle(&state, command).unwrap();
    assert!(matches!(outcome, Outcome::Stop));

    // the conflicting candidate is still queued, never manifested
    let (_, queue_len) = state.orchestrator.stats();
    assert_eq!(queue_len, 1);
}

#[allow(dead_code)]
fn assert_command_variants_compile(c: Command) {
    match c {
        Command::Invoke(_) => {}
        Command::AddRecording { .. } => {}
        Command::AddEffect { .. } => {}
        Command::AddSegment { .. } => {}
        Command::AddPreset { .. } => {}
        Command::RebuildIndex => {}
        Command::Stats => {}
        Command::Stop => {}
    }
}
