use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Standing in for an `averaged_perceptron_tagger`-style POS tagger (§6).
/// Only the tag's first letter is ever consulted downstream (§4.A step 6),
/// so this returns that letter directly rather than a full Penn Treebank
/// tag: `J` (adjective), `V` (verb), `R` (adverb), `N` (noun, the default).
///
/// A closed-class word list handles common irregulars a suffix rule would
/// miss (`is`, `good`, `well`, ...); everything else falls back to suffix
/// heuristics, then the noun default.
const VERBS: &[&str] = &[
    "is", "am", "are", "was", "were", "be", "been", "being", "do", "does", "did", "have", "has", "had", "will",
    "would", "can", "could", "should", "must", "go", "went", "gone", "like", "likes", "love", "loves", "want",
    "wants", "need", "needs", "think", "thinks", "know", "knows", "say", "said", "get", "gets", "make", "makes",
    "see", "sees", "come", "comes",
];

const ADJECTIVES: &[&str] = &[
    "good", "bad", "great", "nice", "happy", "sad", "big", "small", "new", "old", "great", "awesome", "awful",
];

const ADVERBS: &[&str] = &["well", "very", "just", "now", "here", "there", "too", "also", "never", "always"];

static VERB_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| VERBS.iter().copied().collect());
static ADJECTIVE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| ADJECTIVES.iter().copied().collect());
static ADVERB_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| ADVERBS.iter().copied().collect());

/// WordNet part-of-speech class, per the §4.A step-6 mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordNetClass {
    Adjective,
    Verb,
    Adverb,
    Noun,
}

pub fn tag(token: &str) -> WordNetClass {
    if ADVERB_SET.contains(token) || (token.ends_with("ly") && token.len() > 3) {
        return WordNetClass::Adverb;
    }
    if VERB_SET.contains(token) || token.ends_with("ing") || token.ends_with("ed") {
        return WordNetClass::Verb;
    }
    if ADJECTIVE_SET.contains(token)
        || token.ends_with("ful")
        || token.ends_with("ous")
        || token.ends_with("ive")
        || token.ends_with("able")
        || token.ends_with("ible")
        || (token.ends_with("al") && token.len() > 4)
    {
        return WordNetClass::Adjective;
    }
    WordNetClass::Noun
}
