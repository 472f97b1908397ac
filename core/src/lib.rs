//! In-memory inverted index over a tokenized corpus.
//!
//! Two builders (`naive_index`, `spimi_index`), a boolean AND query engine, a
//! frequency-ranked stopword selector and a lossy dictionary compressor that
//! reports how much each normalization stage shrinks the index.

pub mod compress;
pub mod corpus;
pub mod error;
pub mod index;
pub mod normalize;
pub mod query;
pub mod stopwords;

pub use compress::{compression_steps, CompressionReport, StageRecord};
pub use corpus::TokenizedDoc;
pub use error::{IndexError, QueryMiss};
pub use index::{calculate_size, naive_index, spimi_index, DocId, IndexSize, InvertedIndex};
pub use normalize::{normalize_query, one_word_compression};
pub use query::{and_query, single_query, split_query, Query};
pub use stopwords::{stopwords, StopwordList};
