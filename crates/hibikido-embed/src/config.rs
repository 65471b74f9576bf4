use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the embedding provider.
///
/// Deserialized from the `embedding` section of the server's config tree
/// (see `hibikido-server`'s `HibikidoConfig`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbedConfig {
    /// Friendly label surfaced on every embedding call (for logging/metadata).
    #[serde(default = "default_model_name")]
    pub model_name: String,
    /// Fixed output dimensionality. The rest of the system (vector index,
    /// retrieval engine) treats this as a constant wired once at startup.
    #[serde(default = "default_dim")]
    pub dim: usize,
    /// Local path to the sentence-transformer ONNX model, used only when the
    /// `onnx` feature is enabled and `use_stub` is false.
    pub model_path: Option<PathBuf>,
    /// Path to `tokenizer.json`, used only with the `onnx` feature.
    pub tokenizer_path: Option<PathBuf>,
    /// Force the deterministic stub provider even when `onnx` is compiled in.
    /// Useful for offline development and for making tests reproducible.
    #[serde(default = "default_use_stub")]
    pub use_stub: bool,
    /// Where the vector index is persisted. Lives here, not under a
    /// storage-specific section, because spec.md §6 groups it under the
    /// config tree's `embedding` section.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model_name: default_model_name(),
            dim: default_dim(),
            model_path: None,
            tokenizer_path: None,
            use_stub: default_use_stub(),
            index_file: default_index_file(),
        }
    }
}

fn default_model_name() -> String {
    "hibikido-stub-embedder".to_string()
}

const fn default_dim() -> usize {
    384
}

const fn default_use_stub() -> bool {
    true
}

fn default_index_file() -> String {
    "hibikido.index".to_string()
}
