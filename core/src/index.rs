use crate::corpus::TokenizedDoc;
use crate::error::IndexError;
use std::collections::BTreeMap;

pub type DocId = u32;

/// Distinct term count and total postings count of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexSize {
    pub terms: usize,
    pub postings: usize,
}

/// Term to postings-list mapping.
///
/// Terms are kept in a `BTreeMap` so every full scan visits them in the same
/// order. Postings from `naive_index` are ascending and duplicate-free; those
/// from `spimi_index` are in insertion order and may repeat a doc id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvertedIndex {
    pub postings: BTreeMap<String, Vec<DocId>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn get(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn contains(&self, term: &str) -> bool { self.postings.contains_key(term) }

    pub fn len(&self) -> usize { self.postings.len() }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.postings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DocId])> {
        self.postings.iter().map(|(t, p)| (t.as_str(), p.as_slice()))
    }

    pub fn size(&self) -> IndexSize {
        IndexSize {
            terms: self.postings.len(),
            postings: self.postings.values().map(Vec::len).sum(),
        }
    }

    /// Frozen copy of the current keys, for stages that mutate while scanning.
    pub(crate) fn snapshot_terms(&self) -> Vec<String> {
        self.postings.keys().cloned().collect()
    }
}

impl FromIterator<(String, Vec<DocId>)> for InvertedIndex {
    fn from_iter<I: IntoIterator<Item = (String, Vec<DocId>)>>(iter: I) -> Self {
        Self { postings: iter.into_iter().collect() }
    }
}

pub fn calculate_size(index: &InvertedIndex) -> IndexSize { index.size() }

/// Sort-based construction: flatten to (term, doc id) pairs, sort by term then
/// numeric doc id, drop duplicate pairs and group.
pub fn naive_index(corpus: &[TokenizedDoc]) -> Result<InvertedIndex, IndexError> {
    let mut pairs: Vec<(&str, DocId)> = Vec::new();
    for doc in corpus {
        let doc_id = doc.doc_id()?;
        pairs.extend(doc.tokens.iter().map(|t| (t.as_str(), doc_id)));
    }
    let occurrences = pairs.len();
    pairs.sort_unstable();
    pairs.dedup();

    let mut index = InvertedIndex::new();
    for (term, doc_id) in pairs {
        match index.postings.get_mut(term) {
            Some(list) => list.push(doc_id),
            None => { index.postings.insert(term.to_string(), vec![doc_id]); }
        }
    }
    tracing::debug!(docs = corpus.len(), occurrences, terms = index.len(), "naive index built");
    Ok(index)
}

/// Single-pass construction: append each occurrence's doc id to its term in
/// input order. No sort and no dedup.
pub fn spimi_index(corpus: &[TokenizedDoc]) -> Result<InvertedIndex, IndexError> {
    let mut index = InvertedIndex::new();
    let mut occurrences = 0usize;
    for doc in corpus {
        let doc_id = doc.doc_id()?;
        for term in &doc.tokens {
            match index.postings.get_mut(term.as_str()) {
                Some(list) => list.push(doc_id),
                None => { index.postings.insert(term.clone(), vec![doc_id]); }
            }
            occurrences += 1;
        }
    }
    tracing::debug!(docs = corpus.len(), occurrences, terms = index.len(), "spimi index built");
    Ok(index)
}
