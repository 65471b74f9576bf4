//! Embedding provider (C1): text -> 384-dim unit vector.
//!
//! This crate is intentionally small and pure. It knows nothing about
//! documents, rows, or search — it is a black box that turns text into a
//! deterministic unit vector, exactly as spec.md §4.1 describes.

mod config;
mod error;
#[cfg(feature = "onnx")]
mod onnx;
mod provider;
mod stub;

pub use config::EmbedConfig;
pub use error::EmbedError;
pub use provider::EmbeddingProvider;
pub use stub::StubEmbeddingProvider;

#[cfg(feature = "onnx")]
pub use onnx::OnnxEmbeddingProvider;

/// Build the configured embedding provider.
///
/// Returns the deterministic stub when `cfg.use_stub` is set or the `onnx`
/// feature isn't compiled in; otherwise loads the local ONNX model.
pub fn build_provider(cfg: &EmbedConfig) -> Result<Box<dyn EmbeddingProvider>, EmbedError> {
    #[cfg(feature = "onnx")]
    {
        if !cfg.use_stub {
            return Ok(Box::new(OnnxEmbeddingProvider::load(cfg)?));
        }
    }
    let _ = cfg;
    Ok(Box::new(StubEmbeddingProvider::new(cfg)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_provider_defaults_to_stub() {
        let cfg = EmbedConfig::default();
        let provider = build_provider(&cfg).unwrap();
        assert_eq!(provider.dim(), 384);
        assert!(provider.embed("test").is_ok());
    }
}
