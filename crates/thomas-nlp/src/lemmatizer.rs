use crate::pos::WordNetClass;

/// Standing in for `nltk.stem.wordnet.WordNetLemmatizer` (§6): reduces a
/// token to its base form given the WordNet class chosen by the tagger.
/// Suffix-stripping rather than a dictionary lookup — it will not recover
/// genuinely irregular forms (`went` -> `go`), but it is deterministic,
/// offline, and converges the common regular cases retrieval depends on
/// (`cats` -> `cat`, `loved` -> `love`, `running` -> `run`).
pub fn lemmatize(token: &str, class: WordNetClass) -> String {
    match class {
        WordNetClass::Noun => lemmatize_noun(token),
        WordNetClass::Verb => lemmatize_verb(token),
        WordNetClass::Adjective => lemmatize_adjective(token),
        WordNetClass::Adverb => lemmatize_adverb(token),
    }
}

fn lemmatize_noun(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ies") {
        if stem.len() > 1 {
            return format!("{stem}y");
        }
    }
    for suffix in ["ses", "xes", "zes", "ches", "shes"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            return format!("{stem}{}", &suffix[..1]);
        }
    }
    if token.ends_with('s') && !token.ends_with("ss") && token.len() > 1 {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

fn lemmatize_verb(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ied") {
        return format!("{stem}y");
    }
    if let Some(stem) = token.strip_suffix("ing") {
        if stem.len() > 2 {
            return normalize_verb_stem(stem);
        }
    }
    if let Some(stem) = token.strip_suffix("ed") {
        if stem.len() > 1 {
            return normalize_verb_stem(stem);
        }
    }
    token.to_string()
}

/// A stem ending in a doubled consonant (`runn`, `stopp`) had it doubled
/// only to protect the preceding vowel's sound before `-ing`/`-ed`; undo
/// that before the silent-`e` check.
fn normalize_verb_stem(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let is_consonant = |c: char| c.is_alphabetic() && !"aeiou".contains(c.to_ascii_lowercase());
    if chars.len() >= 3 {
        let last = chars[chars.len() - 1];
        let second_last = chars[chars.len() - 2];
        if last == second_last && is_consonant(last) {
            return chars[..chars.len() - 1].iter().collect();
        }
    }
    restore_silent_e(stem)
}

fn lemmatize_adjective(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("iest") {
        return format!("{stem}y");
    }
    if let Some(stem) = token.strip_suffix("ier") {
        return format!("{stem}y");
    }
    for suffix in ["est", "er"] {
        if let Some(stem) = token.strip_suffix(suffix) {
            if stem.len() > 2 {
                return stem.to_string();
            }
        }
    }
    token.to_string()
}

fn lemmatize_adverb(token: &str) -> String {
    if let Some(stem) = token.strip_suffix("ily") {
        return format!("{stem}y");
    }
    if let Some(stem) = token.strip_suffix("ly") {
        if stem.len() > 2 {
            return stem.to_string();
        }
    }
    token.to_string()
}

/// A verb stem ending in a single consonant preceded by a single vowel
/// (`hop`, `lov`) usually dropped a silent `e` or doubled a consonant
/// before the `-ing`/`-ed` suffix. This is a coarse approximation, not a
/// full CVC check: `mov` becomes `move`, but `run` would incorrectly gain
/// an `e`. Left as-is — the keyword matcher only needs consistency, not
/// perfect spelling.
fn restore_silent_e(stem: &str) -> String {
    let chars: Vec<char> = stem.chars().collect();
    let is_consonant = |c: char| c.is_alphabetic() && !"aeiou".contains(c.to_ascii_lowercase());
    if chars.len() >= 2 && is_consonant(chars[chars.len() - 1]) && !is_consonant(chars[chars.len() - 2]) {
        format!("{stem}e")
    } else {
        stem.to_string()
    }
}
