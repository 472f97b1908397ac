use crate::index::InvertedIndex;
use crate::stopwords::{stopwords, LARGE_STOPLIST, SMALL_STOPLIST};
use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

lazy_static! {
    static ref DIGIT: Regex = Regex::new(r"\d").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
}

/// True when the term has at least one Unicode decimal digit.
pub fn contains_digit(term: &str) -> bool { DIGIT.is_match(term) }

pub fn case_fold(term: &str) -> String { term.to_lowercase() }

pub fn stem(term: &str) -> String { STEMMER.stem(term).into_owned() }

/// Normalize a raw query term the way the compressor normalizes dictionary
/// terms, so it can be looked up in a compressed index.
///
/// `original` must be the index as it was before compression; both stopword
/// lists are derived from it on every call. Returns `None` when the term would
/// have been filtered out of the dictionary.
pub fn one_word_compression(term: &str, original: &InvertedIndex) -> Option<String> {
    if contains_digit(term) {
        return None;
    }
    let folded = case_fold(term);
    let small = stopwords(original, SMALL_STOPLIST);
    let large = stopwords(original, LARGE_STOPLIST);
    if small.contains(&folded) || large.contains(&folded) {
        return None;
    }
    Some(stem(&folded))
}

/// Normalize every conjunct of a query. A single filtered conjunct makes the
/// whole query unanswerable against the compressed index.
pub fn normalize_query<S: AsRef<str>>(terms: &[S], original: &InvertedIndex) -> Option<Vec<String>> {
    terms
        .iter()
        .map(|t| one_word_compression(t.as_ref(), original))
        .collect()
}
