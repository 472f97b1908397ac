use crate::error::QueryMiss;
use crate::index::{DocId, InvertedIndex};
use std::collections::BTreeSet;

pub const AND_SEPARATOR: &str = " AND ";

/// A raw query string classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<'a> {
    Single(&'a str),
    And(Vec<&'a str>),
}

impl<'a> Query<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let mut terms = split_query(raw);
        if terms.len() == 1 {
            Query::Single(terms.remove(0))
        } else {
            Query::And(terms)
        }
    }

    pub fn terms(&self) -> Vec<&'a str> {
        match self {
            Query::Single(t) => vec![*t],
            Query::And(ts) => ts.clone(),
        }
    }
}

/// Split on the literal `" AND "`; terms are not trimmed.
pub fn split_query(raw: &str) -> Vec<&str> {
    raw.split(AND_SEPARATOR).collect()
}

pub fn single_query<'i>(index: &'i InvertedIndex, term: &str) -> Result<&'i [DocId], QueryMiss> {
    index
        .get(term)
        .ok_or_else(|| QueryMiss::TermNotFound { term: term.to_string() })
}

/// Conjunctive query. The first term absent from the dictionary fails the
/// whole query; otherwise the postings are intersected as sets and returned
/// ascending.
pub fn and_query<S: AsRef<str>>(index: &InvertedIndex, terms: &[S]) -> Result<Vec<DocId>, QueryMiss> {
    let mut result: Option<BTreeSet<DocId>> = None;
    for term in terms {
        let term = term.as_ref();
        let postings = index
            .get(term)
            .ok_or_else(|| QueryMiss::ConjunctMissing { term: term.to_string() })?;
        result = Some(match result {
            None => postings.iter().copied().collect(),
            Some(acc) => {
                let next: BTreeSet<DocId> = postings.iter().copied().collect();
                acc.intersection(&next).copied().collect()
            }
        });
    }
    Ok(result.map(|set| set.into_iter().collect()).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::TokenizedDoc;
    use crate::index::{naive_index, spimi_index};

    fn corpus() -> Vec<TokenizedDoc> {
        vec![
            TokenizedDoc::new("3", ["copper", "Chrysler", "copper"]),
            TokenizedDoc::new("1", ["copper", "Bundesbank"]),
            TokenizedDoc::new("2", ["Chrysler", "Bundesbank", "copper"]),
        ]
    }

    #[test]
    fn single_query_returns_postings_unchanged() {
        let index = naive_index(&corpus()).unwrap();
        assert_eq!(single_query(&index, "copper"), Ok(&[1, 2, 3][..]));
        assert_eq!(
            single_query(&index, "pineapple"),
            Err(QueryMiss::TermNotFound { term: "pineapple".into() })
        );
    }

    #[test]
    fn and_query_intersects() {
        let index = naive_index(&corpus()).unwrap();
        assert_eq!(and_query(&index, &["Chrysler", "Bundesbank"]), Ok(vec![2]));
        assert_eq!(and_query(&index, &["copper", "Chrysler"]), Ok(vec![2, 3]));
    }

    #[test]
    fn and_query_treats_spimi_postings_as_sets() {
        let index = spimi_index(&corpus()).unwrap();
        assert_eq!(index.get("copper"), Some(&[3, 3, 1, 2][..]));
        assert_eq!(and_query(&index, &["copper"]), Ok(vec![1, 2, 3]));
        assert_eq!(and_query(&index, &["copper", "Chrysler"]), Ok(vec![2, 3]));
    }

    #[test]
    fn missing_conjunct_is_not_an_empty_result() {
        let index = naive_index(&corpus()).unwrap();
        assert_eq!(
            and_query(&index, &["x"]),
            Err(QueryMiss::ConjunctMissing { term: "x".into() })
        );
        let miss = and_query(&index, &["copper", "x", "y"]).unwrap_err();
        assert_eq!(miss.term(), "x");
    }

    #[test]
    fn empty_intersection_is_ok() {
        let corpus = vec![TokenizedDoc::new("1", ["a"]), TokenizedDoc::new("2", ["b"])];
        let index = naive_index(&corpus).unwrap();
        assert_eq!(and_query(&index, &["a", "b"]), Ok(vec![]));
    }

    #[test]
    fn parse_splits_on_literal_and() {
        assert_eq!(Query::parse("copper"), Query::Single("copper"));
        assert_eq!(Query::parse("a AND b"), Query::And(vec!["a", "b"]));
        assert_eq!(Query::parse("a and b"), Query::Single("a and b"));
        assert_eq!(split_query("a AND  b"), vec!["a", " b"]);
    }
}
