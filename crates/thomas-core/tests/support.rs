use std::collections::HashSet;

use thomas_core::{NormalizedText, TextNormalizer};

/// Minimal stand-in for the external NLP bundle (§6), used only to drive
/// the end-to-end scenario tests without pulling in `thomas-nlp`'s
/// heuristic tagger/lemmatizer. Lowercases and splits on whitespace; a
/// fixed small stop-word list decides keyword vs. stop-word, with no
/// lemmatization (the scenario inputs are already singular/base forms).
pub struct StubNormalizer;

const STOP_WORDS: &[&str] = &["i", "you", "do", "are", "is", "the", "a", "yes"];

impl TextNormalizer for StubNormalizer {
    fn normalize(&self, text: &str) -> NormalizedText {
        let raw_tokens: Vec<String> = text.to_lowercase().split_whitespace().map(str::to_string).collect();
        let (keywords, stop_words) = self.classify_tokens(&raw_tokens);
        NormalizedText { raw_tokens, keywords, stop_words }
    }

    fn classify_tokens(&self, tokens: &[String]) -> (HashSet<String>, HashSet<String>) {
        let mut keywords = HashSet::new();
        let mut stop_words = HashSet::new();
        for token in tokens {
            if STOP_WORDS.contains(&token.as_str()) {
                stop_words.insert(token.clone());
            } else {
                keywords.insert(token.clone());
            }
        }
        (keywords, stop_words)
    }
}
