use thiserror::Error;

/// Failure while building an index from a corpus.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("document id {id:?} is not an unsigned integer")]
    InvalidDocumentId { id: String },
}

/// A query that could not be answered from the dictionary.
///
/// These are expected outcomes, kept apart from an empty `Ok` result: an
/// empty intersection and an unknown term are different facts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryMiss {
    #[error("term {term:?} not found")]
    TermNotFound { term: String },
    #[error("conjunct {term:?} missing from the index")]
    ConjunctMissing { term: String },
}

impl QueryMiss {
    pub fn term(&self) -> &str {
        match self {
            QueryMiss::TermNotFound { term } | QueryMiss::ConjunctMissing { term } => term,
        }
    }
}
