use crate::clean::clean_tokens;
use crate::lemmatize::{Lemmatizer, PassthroughLemmatizer};

/// Hard global cap on composed embedding text length, per spec.md §4.4 step 5.
pub const GLOBAL_TOKEN_CAP: usize = 20;

/// One source text with its per-source word budget, most-specific first.
pub struct Source<'a> {
    pub text: &'a str,
    pub budget: usize,
}

impl<'a> Source<'a> {
    pub fn new(text: &'a str, budget: usize) -> Self {
        Self { text, budget }
    }
}

/// Deterministic, side-effect-free embedding-text builder.
///
/// Pure with respect to its lemmatizer: the same `Composer` instance always
/// produces the same text for the same inputs, because the lemmatizer
/// (present or absent) is fixed at construction.
pub struct Composer {
    lemmatizer: Box<dyn Lemmatizer>,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Composer {
    pub fn new(lemmatizer: Option<Box<dyn Lemmatizer>>) -> Self {
        Self {
            lemmatizer: lemmatizer.unwrap_or_else(|| Box::new(PassthroughLemmatizer)),
        }
    }

    /// Build the embedding text for an ordered list of (source, budget)
    /// pairs: clean -> lemmatize -> take at most `budget` tokens per source
    /// -> concatenate with single spaces -> enforce the 20-token global cap.
    pub fn compose(&self, sources: &[Source]) -> String {
        let mut tokens: Vec<String> = Vec::new();
        for source in sources {
            let cleaned = clean_tokens(source.text);
            let lemmatized: Vec<String> = cleaned
                .iter()
                .map(|token| self.lemmatizer.lemmatize(token))
                .collect();
            tokens.extend(lemmatized.into_iter().take(source.budget));
        }
        tokens.truncate(GLOBAL_TOKEN_CAP);
        tokens.join(" ")
    }

    /// Segment priority: segment description (10), segmentation description
    /// (5), recording description (5).
    pub fn compose_segment(
        &self,
        segment_description: &str,
        segmentation_description: &str,
        recording_description: &str,
    ) -> String {
        self.compose(&[
            Source::new(segment_description, 10),
            Source::new(segmentation_description, 5),
            Source::new(recording_description, 5),
        ])
    }

    /// Preset priority: preset description (10), effect description (5).
    pub fn compose_preset(&self, preset_description: &str, effect_description: &str) -> String {
        self.compose(&[
            Source::new(preset_description, 10),
            Source::new(effect_description, 5),
        ])
    }

    /// Query-time enhancement: same cleaning and lemmatization, no budget,
    /// no global cap — spec.md §4.4's "the composer applies the same
    /// cleaning but no budget" for search-time queries.
    pub fn enhance_query(&self, query: &str) -> String {
        clean_tokens(query)
            .into_iter()
            .map(|token| self.lemmatizer.lemmatize(&token))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
