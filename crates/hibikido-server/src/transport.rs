use rosc::{OscMessage, OscPacket, OscType};

use crate::error::ServerError;
use crate::state::ServerState;
use hibikido_orchestrator::ManifestPayload;

/// Decodes one inbound UDP datagram into an [`OscMessage`]. OSC bundles
/// are out of scope (spec.md §1 treats the transport as an external
/// collaborator specified only where the core touches it; this server
/// only ever receives single messages on the addresses in spec.md §6).
pub fn decode_packet(buf: &[u8]) -> Result<OscMessage, ServerError> {
    let (_, packet) =
        rosc::decoder::decode_udp(buf).map_err(|e| ServerError::BadRequest(format!("malformed OSC packet: {e}")))?;
    match packet {
        OscPacket::Message(message) => Ok(message),
        OscPacket::Bundle(_) => Err(ServerError::BadRequest("OSC bundles are not supported".to_string())),
    }
}

fn encode(message: OscMessage) -> Result<Vec<u8>, ServerError> {
    rosc::encoder::encode(&OscPacket::Message(message))
        .map_err(|e| ServerError::Startup(format!("OSC encode failed: {e}")))
}

/// Builds the 8-field `/manifest` payload spec.md §6 specifies.
pub fn encode_manifest(seq: u64, payload: &ManifestPayload) -> Result<Vec<u8>, ServerError> {
    encode(OscMessage {
        addr: "/manifest".to_string(),
        args: vec![
            OscType::Int(seq as i32),
            OscType::String(payload.collection.to_string()),
            OscType::Float(payload.score),
            OscType::String(payload.path.clone()),
            OscType::String(payload.description.clone()),
            OscType::Float(payload.start),
            OscType::Float(payload.end),
            OscType::String(payload.parameters_json.clone()),
        ],
    })
}

pub fn encode_confirm(message: &str) -> Result<Vec<u8>, ServerError> {
    encode(OscMessage {
        addr: "/confirm".to_string(),
        args: vec![OscType::String(message.to_string())],
    })
}

pub fn encode_error(err: &ServerError) -> Result<Vec<u8>, ServerError> {
    encode(OscMessage {
        addr: "/error".to_string(),
        args: vec![OscType::String(err.wire_message())],
    })
}

/// `(recordings, segments, effects, presets, embeddings, active_niches, queued)`.
pub fn encode_stats_result(
    stats: (usize, usize, usize, usize, usize, usize, usize),
) -> Result<Vec<u8>, ServerError> {
    let (recordings, segments, effects, presets, embeddings, active_niches, queued) = stats;
    encode(OscMessage {
        addr: "/stats_result".to_string(),
        args: vec![
            OscType::Int(recordings as i32),
            OscType::Int(segments as i32),
            OscType::Int(effects as i32),
            OscType::Int(presets as i32),
            OscType::Int(embeddings as i32),
            OscType::Int(active_niches as i32),
            OscType::Int(queued as i32),
        ],
    })
}

/// Encodes one admission into its `/manifest` wire bytes, assigning it the
/// next sequence index from `state`.
pub fn encode_admission(state: &ServerState, payload: &ManifestPayload) -> Result<Vec<u8>, ServerError> {
    encode_manifest(state.next_manifest_seq(), payload)
}
