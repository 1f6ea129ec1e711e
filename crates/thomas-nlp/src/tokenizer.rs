/// ASCII punctuation set mirroring Python's `string.punctuation`, stripped
/// in §4.A step (3) before tokenization.
const ASCII_PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Deletes ASCII punctuation characters from `text` (§4.A step 3).
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !ASCII_PUNCTUATION.contains(*c)).collect()
}

/// Word-tokenizes already depunctuated text by splitting on whitespace
/// (§6: "An English tokenizer: splitting on whitespace-like boundaries
/// after punctuation is removed").
pub fn word_tokenize(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_but_keeps_letters() {
        assert_eq!(strip_punctuation("hello, world!"), "hello world");
    }

    #[test]
    fn tokenizes_on_whitespace() {
        assert_eq!(word_tokenize("hello   there  friend"), vec!["hello", "there", "friend"]);
    }
}
