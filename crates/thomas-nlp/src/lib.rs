//! Reference implementation of the external NLP resource bundle Thomas's
//! core depends on (spec §6): a stop-word set, contractions expander,
//! word tokenizer, POS tagger, and lemmatizer, composed into the
//! [`thomas_core::TextNormalizer`] pipeline from §4.A.
//!
//! Out of scope for the core's correctness per §1 — this crate exists so
//! the workspace builds and runs end-to-end without a network-fetched
//! corpus. It substitutes compact, deterministic heuristics for the
//! NLTK/WordNet resources the original implementation downloads at
//! startup; see `lemmatizer.rs` and `pos.rs` for what each heuristic
//! covers and where it diverges from a real dictionary lookup.

mod contractions;
mod lemmatizer;
mod pos;
mod stopwords;
mod tokenizer;

use std::collections::HashSet;

use thomas_core::{NormalizedText, TextNormalizer};
use tracing::trace;

/// The concrete English [`TextNormalizer`]: lowercase -> expand
/// contractions -> strip punctuation -> tokenize -> POS-tag -> lemmatize
/// -> split into keywords vs. stop-words (§4.A steps 1-7).
#[derive(Debug, Default, Clone, Copy)]
pub struct EnglishNormalizer;

impl TextNormalizer for EnglishNormalizer {
    fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let expanded = contractions::expand(&lowered);
        let stripped = tokenizer::strip_punctuation(&expanded);
        let raw_tokens = tokenizer::word_tokenize(&stripped);
        let (keywords, stop_words) = self.classify_tokens(&raw_tokens);
        trace!(tokens = raw_tokens.len(), keywords = keywords.len(), stop_words = stop_words.len(), "normalized message");
        NormalizedText { raw_tokens, keywords, stop_words }
    }

    fn classify_tokens(&self, tokens: &[String]) -> (HashSet<String>, HashSet<String>) {
        let mut keywords = HashSet::new();
        let mut stop_words = HashSet::new();
        for token in tokens {
            let class = pos::tag(token);
            let lemma = lemmatizer::lemmatize(token, class);
            if stopwords::is_stop_word(&lemma) {
                stop_words.insert(lemma);
            } else {
                keywords.insert(lemma);
            }
        }
        (keywords, stop_words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_tokens_are_pre_lemmatization() {
        let normalized = EnglishNormalizer.normalize("The cats are running!");
        assert_eq!(normalized.raw_tokens, vec!["the", "cats", "are", "running"]);
    }

    #[test]
    fn keywords_are_lemmatized_content_words() {
        let normalized = EnglishNormalizer.normalize("The cats are running quickly");
        assert!(normalized.keywords.contains("cat"));
        assert!(normalized.keywords.contains("run"));
        assert!(normalized.stop_words.contains("the"));
        assert!(normalized.stop_words.contains("are"));
    }

    #[test]
    fn contractions_expand_before_punctuation_strip() {
        let normalized = EnglishNormalizer.normalize("I don't like cats");
        assert_eq!(normalized.raw_tokens, vec!["i", "do", "not", "like", "cats"]);
    }

    #[test]
    fn identical_surface_text_collides_on_raw_tokens() {
        let a = EnglishNormalizer.normalize("Hello there!");
        let b = EnglishNormalizer.normalize("hello there");
        assert_eq!(a.raw_tokens, b.raw_tokens);
    }
}
