use tracing::instrument;

use hibikido_orchestrator::ManifestPayload;
use hibikido_retrieval::{EffectFields, Hit, PresetFields, RecordingFields, SegmentFields};

use crate::error::ServerError;
use crate::state::ServerState;

use super::decode::Command;

/// Result of dispatching one [`Command`], mapped 1:1 onto the outbound
/// addresses spec.md §6 names.
#[derive(Debug)]
pub enum Outcome {
    Confirm(String),
    Stats((usize, usize, usize, usize, usize, usize, usize)),
    Stop,
}

/// Runs one decoded command against the shared server state. Every error
/// path returns `Err(ServerError)` rather than swallowing it (spec.md §7's
/// "never silently drops"); the caller maps that to a wire `/error`.
#[instrument(skip(state, command))]
pub fn handle(state: &ServerState, command: Command) -> Result<Outcome, ServerError> {
    match command {
        Command::Invoke(text) => invoke(state, &text),
        Command::AddRecording { path, body } => {
            state.engine.ingest_recording(RecordingFields {
                path,
                description: body.description,
            })?;
            Ok(Outcome::Confirm("recording added".to_string()))
        }
        Command::AddEffect { path, body } => {
            state.engine.ingest_effect(EffectFields {
                path,
                name: body.name,
                description: body.description,
            })?;
            Ok(Outcome::Confirm("effect added".to_string()))
        }
        Command::AddSegment { description, body } => {
            state.engine.ingest_segment(SegmentFields {
                recording_path: body.source_path,
                segmentation_id: body.segmentation_id,
                start: body.start,
                end: body.end,
                description,
                freq_low: body.freq_low,
                freq_high: body.freq_high,
                duration_seconds: body.duration,
            })?;
            Ok(Outcome::Confirm("segment added".to_string()))
        }
        Command::AddPreset { description, body } => {
            state.engine.ingest_preset(PresetFields {
                effect_path: body.effect_path,
                parameters: body.parameters,
                description,
            })?;
            Ok(Outcome::Confirm("preset added".to_string()))
        }
        Command::RebuildIndex => {
            let report = state.engine.rebuild_index()?;
            Ok(Outcome::Confirm(format!(
                "rebuilt {} document(s), {} failed",
                report.rebuilt,
                report.failed.len()
            )))
        }
        Command::Stats => Ok(Outcome::Stats(state.stats())),
        Command::Stop => Ok(Outcome::Stop),
    }
}

/// `/invoke` (and its `/search` synonym): search, keep only segment hits
/// (presets are dropped at this boundary per spec.md §9's reference
/// behavior), enqueue each in descending-score order, acknowledge with the
/// count queued.
fn invoke(state: &ServerState, text: &str) -> Result<Outcome, ServerError> {
    let hits = state.engine.search(text, state.search.top_k, state.search.min_score)?;

    let mut queued = 0usize;
    for hit in hits {
        let Hit::Segment { score, segment, .. } = hit else {
            continue;
        };
        let payload = ManifestPayload {
            collection: "segments",
            score,
            path: segment.recording_path.clone(),
            description: segment.description.clone(),
            start: segment.start,
            end: segment.end,
            parameters_json: "[]".to_string(),
        };
        state.orchestrator.enqueue(
            segment.id,
            payload,
            segment.freq_low,
            segment.freq_high,
            segment.duration_seconds,
        );
        queued += 1;
    }

    Ok(Outcome::Confirm(queued.to_string()))
}
