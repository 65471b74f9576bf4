use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Fixed stop-word set: common English function words plus audio-adjacent
/// noise words that would otherwise dominate every embedding text in this
/// domain ("sound", "audio", "recording" appear in nearly every
/// description and carry no discriminating signal).
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "of", "in", "on", "at", "to", "for", "and", "or", "with", "by", "is",
        "are", "was", "were", "be", "been", "being", "this", "that", "these", "those", "it",
        "its", "as", "from", "into", "over", "under", "some", "any", "very", "used", "using",
        "sound", "sounds", "audio", "recording", "recordings", "clip", "file",
    ]
    .into_iter()
    .collect()
});

/// Lowercase, strip punctuation to whitespace, collapse whitespace, and drop
/// stop words. Returns cleaned tokens in their original order.
pub fn clean_tokens(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let stripped: String = lowered
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    stripped
        .split_whitespace()
        .filter(|token| !STOP_WORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        let tokens = clean_tokens("Forest Wind, Rustling!");
        assert_eq!(tokens, vec!["forest", "wind", "rustling"]);
    }

    #[test]
    fn drops_stop_words_and_noise_words() {
        let tokens = clean_tokens("a recording of the forest sound");
        assert_eq!(tokens, vec!["forest"]);
    }

    #[test]
    fn collapses_whitespace() {
        let tokens = clean_tokens("wind    in   the   trees");
        assert_eq!(tokens, vec!["wind", "trees"]);
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(clean_tokens("").is_empty());
    }
}
