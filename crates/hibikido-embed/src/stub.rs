use fxhash::hash64;

use crate::config::EmbedConfig;
use crate::error::EmbedError;
use crate::provider::EmbeddingProvider;

/// Deterministic embedding provider used when no real model is configured.
///
/// Generates sinusoid values derived from a hash of the input text so that
/// the same text always produces the same vector, without pulling in any
/// inference runtime. Useful for tests and offline/air-gapped runs.
#[derive(Debug, Default)]
pub struct StubEmbeddingProvider {
    dim: usize,
}

impl StubEmbeddingProvider {
    pub fn new(cfg: &EmbedConfig) -> Self {
        Self { dim: cfg.dim }
    }
}

impl EmbeddingProvider for StubEmbeddingProvider {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let mut v = vec![0f32; self.dim];
        let h = hash64(text.as_bytes());
        for (idx, value) in v.iter_mut().enumerate() {
            *value = ((h >> (idx % 32)) as f32 * 0.0001).sin();
        }
        l2_normalize_in_place(&mut v);
        Ok(v)
    }

    fn dim(&self) -> usize {
        self.dim
    }
}

pub(crate) fn l2_normalize_in_place(v: &mut [f32]) {
    let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in v.iter_mut() {
            *value /= norm;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> EmbedConfig {
        EmbedConfig {
            dim: 384,
            ..EmbedConfig::default()
        }
    }

    #[test]
    fn embeds_to_configured_dimension() {
        let provider = StubEmbeddingProvider::new(&cfg());
        let v = provider.embed("forest wind").unwrap();
        assert_eq!(v.len(), 384);
    }

    #[test]
    fn is_l2_normalized() {
        let provider = StubEmbeddingProvider::new(&cfg());
        let v = provider.embed("a gentle rain over the canopy").unwrap();
        let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-4, "norm was {norm}");
    }

    #[test]
    fn is_deterministic() {
        let provider = StubEmbeddingProvider::new(&cfg());
        let a = provider.embed("same text").unwrap();
        let b = provider.embed("same text").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn differs_for_different_text() {
        let provider = StubEmbeddingProvider::new(&cfg());
        let a = provider.embed("hello").unwrap();
        let b = provider.embed("world").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_text_is_still_valid() {
        let provider = StubEmbeddingProvider::new(&cfg());
        let v = provider.embed("").unwrap();
        assert_eq!(v.len(), 384);
    }
}
