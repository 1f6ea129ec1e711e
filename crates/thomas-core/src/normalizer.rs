use std::collections::HashSet;

/// Output of the text normalizer pipeline (§4.A): the ordered, pre-lemma
/// token list used as the storage key, plus the lemmatized keyword and
/// stop-word sets used for retrieval. Keeping these asymmetric is
/// intentional and load-bearing — see §4.A's closing paragraph.
#[derive(Debug, Clone, Default)]
pub struct NormalizedText {
    pub raw_tokens: Vec<String>,
    pub keywords: HashSet<String>,
    pub stop_words: HashSet<String>,
}

/// The external NLP resource bundle from §6, as a port the core depends on
/// without knowing its implementation. `thomas-nlp` is the reference
/// implementation; any conforming implementation can replace it.
pub trait TextNormalizer {
    /// Runs the full pipeline from §4.A steps (1)-(7) over a raw message.
    fn normalize(&self, text: &str) -> NormalizedText;

    /// Runs only steps (6)-(7) — POS-tag, lemmatize, and split into
    /// keywords/stop-words — over an already-tokenized, already-lowercased
    /// utterance. Used by the learner (§4.E) when lazily building a Link
    /// from a previously stored utterance's raw tokens.
    fn classify_tokens(&self, tokens: &[String]) -> (HashSet<String>, HashSet<String>);
}
