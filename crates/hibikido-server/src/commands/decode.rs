use rosc::{OscMessage, OscType};

use crate::error::ServerError;

use super::bodies::{EffectBody, PresetBody, RecordingBody, SegmentBody};

/// A decoded control-message command, per spec.md §6's inbound address
/// table. Dynamic JSON argument blobs are decoded field-by-field into a
/// typed record up front (spec.md §9's "Dynamic JSON argument blobs"
/// note), unknown fields ignored rather than rejected — the same
/// permissive stance the teacher takes decoding its own JSON payloads.
#[derive(Debug)]
pub enum Command {
    Invoke(String),
    AddRecording { path: String, body: RecordingBody },
    AddEffect { path: String, body: EffectBody },
    AddSegment { description: String, body: SegmentBody },
    AddPreset { description: String, body: PresetBody },
    RebuildIndex,
    Stats,
    Stop,
}

fn string_arg(args: &[OscType], index: usize, name: &str) -> Result<String, ServerError> {
    match args.get(index) {
        Some(OscType::String(s)) => Ok(s.clone()),
        Some(other) => Err(ServerError::BadRequest(format!(
            "argument {index} ({name}) expected a string, got {other:?}"
        ))),
        None => Err(ServerError::BadRequest(format!("missing argument {index} ({name})"))),
    }
}

fn json_arg<T: serde::de::DeserializeOwned>(args: &[OscType], index: usize, name: &str) -> Result<T, ServerError> {
    let raw = string_arg(args, index, name)?;
    serde_json::from_str(&raw).map_err(|e| ServerError::BadRequest(format!("invalid JSON in {name}: {e}")))
}

/// Decodes an inbound OSC message into a [`Command`]. `/search` is kept as
/// a legacy synonym of `/invoke` (spec.md §6).
pub fn decode(message: &OscMessage) -> Result<Command, ServerError> {
    match message.addr.as_str() {
        "/invoke" | "/search" => Ok(Command::Invoke(string_arg(&message.args, 0, "text")?)),
        "/add_recording" => {
            let path = string_arg(&message.args, 0, "path")?;
            let body = json_arg(&message.args, 1, "body")?;
            Ok(Command::AddRecording { path, body })
        }
        "/add_effect" => {
            let path = string_arg(&message.args, 0, "path")?;
            let body = json_arg(&message.args, 1, "body")?;
            Ok(Command::AddEffect { path, body })
        }
        "/add_segment" => {
            let description = string_arg(&message.args, 0, "description")?;
            let body = json_arg(&message.args, 1, "body")?;
            Ok(Command::AddSegment { description, body })
        }
        "/add_preset" => {
            let description = string_arg(&message.args, 0, "description")?;
            let body = json_arg(&message.args, 1, "body")?;
            Ok(Command::AddPreset { description, body })
        }
        "/rebuild_index" => Ok(Command::RebuildIndex),
        "/stats" => Ok(Command::Stats),
        "/stop" => Ok(Command::Stop),
        other => Err(ServerError::BadRequest(format!("unknown address: {other}"))),
    }
}
