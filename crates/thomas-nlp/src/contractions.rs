use once_cell::sync::Lazy;
use regex::Regex;

/// Contraction expansion table, standing in for the `contractions` package
/// (§6: "A contractions expander: string-to-string rewriter"). Operates on
/// already-lowercased text, before punctuation is stripped, since the
/// apostrophe is the pattern anchor (§4.A steps 1-2).
const CONTRACTIONS: &[(&str, &str)] = &[
    ("won't", "will not"),
    ("can't", "cannot"),
    ("shan't", "shall not"),
    ("don't", "do not"),
    ("doesn't", "does not"),
    ("didn't", "did not"),
    ("isn't", "is not"),
    ("aren't", "are not"),
    ("wasn't", "was not"),
    ("weren't", "were not"),
    ("haven't", "have not"),
    ("hasn't", "has not"),
    ("hadn't", "had not"),
    ("wouldn't", "would not"),
    ("shouldn't", "should not"),
    ("couldn't", "could not"),
    ("mustn't", "must not"),
    ("i'm", "i am"),
    ("you're", "you are"),
    ("we're", "we are"),
    ("they're", "they are"),
    ("it's", "it is"),
    ("that's", "that is"),
    ("there's", "there is"),
    ("what's", "what is"),
    ("where's", "where is"),
    ("who's", "who is"),
    ("how's", "how is"),
    ("let's", "let us"),
    ("i've", "i have"),
    ("you've", "you have"),
    ("we've", "we have"),
    ("they've", "they have"),
    ("i'll", "i will"),
    ("you'll", "you will"),
    ("he'll", "he will"),
    ("she'll", "she will"),
    ("we'll", "we will"),
    ("they'll", "they will"),
    ("i'd", "i would"),
    ("you'd", "you would"),
    ("he'd", "he would"),
    ("she'd", "she would"),
    ("we'd", "we would"),
    ("they'd", "they would"),
    ("y'all", "you all"),
];

static PATTERNS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CONTRACTIONS
        .iter()
        .map(|(pattern, expansion)| {
            let escaped = regex::escape(pattern);
            (Regex::new(&format!(r"\b{escaped}\b")).expect("static contraction pattern is valid regex"), *expansion)
        })
        .collect()
});

/// Expands known English contractions in already-lowercased `text`.
pub fn expand(text: &str) -> String {
    let mut out = text.to_string();
    for (pattern, expansion) in PATTERNS.iter() {
        out = pattern.replace_all(&out, *expansion).into_owned();
    }
    out
}
