use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCT: Regex = Regex::new(r"[^\w\s]").expect("valid regex");
}

/// Split raw text into case-preserved tokens: NFKC, punctuation replaced by
/// spaces, then whitespace split. Digits survive; the dictionary compressor
/// decides what to do with them.
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized = text.nfkc().collect::<String>();
    PUNCT
        .replace_all(&normalized, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
