use crate::index::InvertedIndex;
use anyhow::Result;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Cutoffs used by both the dictionary compressor and the query-term
/// normalizer. They must agree for compressed-index queries to line up.
pub const SMALL_STOPLIST: usize = 30;
pub const LARGE_STOPLIST: usize = 150;

/// Terms ranked by document frequency, most frequent first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordList {
    /// (document frequency, term), sorted descending on both.
    pub entries: Vec<(usize, String)>,
}

impl StopwordList {
    pub fn terms(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, t)| t.as_str()).collect()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.entries.iter().any(|(_, t)| t == term)
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut f = File::create(path)?;
        write!(f, "{self}")?;
        Ok(())
    }
}

impl fmt::Display for StopwordList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (freq, term) in &self.entries {
            writeln!(f, "({freq}, '{term}')")?;
        }
        Ok(())
    }
}

/// Top-`k` terms by postings-list length.
///
/// Bounded running selection over the index in term order: fill up to `k`,
/// then a candidate only displaces the current minimum when its frequency is
/// strictly larger. The selection is re-sorted descending by
/// (frequency, term) after every change, so ties rank the lexicographically
/// larger term first. Recomputed from scratch on every call.
pub fn stopwords(index: &InvertedIndex, k: usize) -> StopwordList {
    let mut entries: Vec<(usize, String)> = Vec::with_capacity(k);
    if k == 0 {
        return StopwordList { entries };
    }
    for (term, postings) in index.iter() {
        let freq = postings.len();
        if entries.len() < k {
            entries.push((freq, term.to_string()));
        } else if entries.last().is_some_and(|(min, _)| freq > *min) {
            let last = entries.len() - 1;
            entries[last] = (freq, term.to_string());
        } else {
            continue;
        }
        entries.sort_unstable_by(|a, b| b.cmp(a));
    }
    StopwordList { entries }
}
