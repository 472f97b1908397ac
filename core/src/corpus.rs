use crate::error::IndexError;
use crate::index::DocId;

/// One already-tokenized document: the id as received plus its tokens in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedDoc {
    pub id: String,
    pub tokens: Vec<String>,
}

impl TokenizedDoc {
    pub fn new<I, T>(id: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self { id: id.into(), tokens: tokens.into_iter().map(Into::into).collect() }
    }

    /// Parse the id as a `DocId`; no trimming is applied.
    pub fn doc_id(&self) -> Result<DocId, IndexError> {
        self.id
            .parse::<DocId>()
            .map_err(|_| IndexError::InvalidDocumentId { id: self.id.clone() })
    }
}

/// Total number of (term, doc id) occurrences in a corpus.
pub fn pair_count(corpus: &[TokenizedDoc]) -> usize {
    corpus.iter().map(|d| d.tokens.len()).sum()
}

/// Keep only the first `limit` (term, doc id) occurrences, cutting the last
/// document short if needed.
pub fn truncate_pairs(corpus: &[TokenizedDoc], limit: usize) -> Vec<TokenizedDoc> {
    let mut out = Vec::new();
    let mut counter = 0usize;
    for doc in corpus {
        if counter + doc.tokens.len() > limit {
            let remaining = limit - counter;
            out.push(TokenizedDoc { id: doc.id.clone(), tokens: doc.tokens[..remaining].to_vec() });
            break;
        }
        counter += doc.tokens.len();
        out.push(doc.clone());
    }
    out
}
