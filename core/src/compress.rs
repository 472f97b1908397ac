//! Lossy dictionary compression.
//!
//! Stages run in a fixed order and each one rewrites the index in place:
//! number filtering, case folding, stopword pruning at two cutoffs, then
//! stemming. Every stage scans a frozen snapshot of the keys and mutates the
//! live map, never the other way round.

use crate::index::{DocId, IndexSize, InvertedIndex};
use crate::normalize::{case_fold, contains_digit, stem};
use crate::stopwords::{stopwords, StopwordList, LARGE_STOPLIST, SMALL_STOPLIST};
use anyhow::Result;
use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const NO_NUMBER: &str = "no number";
pub const CASE_FOLDING: &str = "case folding";
pub const STOPWORDS_30: &str = "30 stopwords";
pub const STOPWORDS_150: &str = "150 stopwords";
pub const STEMMING: &str = "stemming";

/// Size of the index after one stage, and the losses it caused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub stage: &'static str,
    pub size: IndexSize,
    pub terms_delta: i64,
    pub terms_total: i64,
    pub postings_delta: i64,
    pub postings_total: i64,
}

/// Outcome of one `compression_steps` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressionReport {
    pub initial: IndexSize,
    pub stages: Vec<StageRecord>,
    /// Lists removed by the two stopword stages, in the order they were computed.
    pub stoplist_small: StopwordList,
    pub stoplist_large: StopwordList,
}

impl CompressionReport {
    fn new(initial: IndexSize) -> Self {
        Self {
            initial,
            stages: Vec::new(),
            stoplist_small: StopwordList::default(),
            stoplist_large: StopwordList::default(),
        }
    }

    /// Size after the last recorded stage, or the initial size.
    pub fn current(&self) -> IndexSize {
        self.stages.last().map(|s| s.size).unwrap_or(self.initial)
    }

    pub fn stage(&self, name: &str) -> Option<&StageRecord> {
        self.stages.iter().find(|s| s.stage == name)
    }

    fn record(&mut self, stage: &'static str, after: IndexSize) {
        let before = self.current();
        let record = StageRecord {
            stage,
            size: after,
            terms_delta: loss(before.terms, after.terms),
            terms_total: loss(self.initial.terms, after.terms),
            postings_delta: loss(before.postings, after.postings),
            postings_total: loss(self.initial.postings, after.postings),
        };
        tracing::info!(
            stage,
            terms = after.terms,
            postings = after.postings,
            terms_delta = record.terms_delta,
            postings_delta = record.postings_delta,
            "compression stage done"
        );
        self.stages.push(record);
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut f = File::create(path)?;
        write!(f, "{self}")?;
        Ok(())
    }
}

impl fmt::Display for CompressionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Initial size: {} | postings: {}", self.initial.terms, self.initial.postings)?;
        writeln!(f, "The following numbers are the losses, not the new size")?;
        writeln!(f, "Numbers: terms: relative-loss total-loss | postings: relative-loss total-loss")?;
        for s in &self.stages {
            writeln!(
                f,
                "After '{}': {} {} | postings: {} {}",
                s.stage, s.terms_delta, s.terms_total, s.postings_delta, s.postings_total
            )?;
        }
        Ok(())
    }
}

fn loss(before: usize, after: usize) -> i64 { before as i64 - after as i64 }

/// Run every stage against `index`, which ends up destructively compressed.
pub fn compression_steps(index: &mut InvertedIndex) -> CompressionReport {
    let mut report = CompressionReport::new(index.size());

    remove_numbers(index);
    report.record(NO_NUMBER, index.size());

    conflate(index, case_fold);
    report.record(CASE_FOLDING, index.size());

    let small = stopwords(index, SMALL_STOPLIST);
    remove_terms(index, &small);
    report.record(STOPWORDS_30, index.size());

    let large = stopwords(index, LARGE_STOPLIST);
    remove_terms(index, &large);
    report.record(STOPWORDS_150, index.size());

    conflate(index, stem);
    report.record(STEMMING, index.size());

    report.stoplist_small = small;
    report.stoplist_large = large;
    report
}

/// Drop every term containing a digit.
pub fn remove_numbers(index: &mut InvertedIndex) {
    for term in index.snapshot_terms() {
        if contains_digit(&term) {
            index.postings.remove(&term);
        }
    }
}

pub fn remove_terms(index: &mut InvertedIndex, list: &StopwordList) {
    for term in index.snapshot_terms() {
        if list.contains(&term) {
            index.postings.remove(&term);
        }
    }
}

/// Rewrite every term to `map(term)`. A term whose image already exists is
/// merged into it; otherwise its postings move to the new key as they are.
pub fn conflate<F>(index: &mut InvertedIndex, map: F)
where
    F: Fn(&str) -> String,
{
    for term in index.snapshot_terms() {
        let target = map(term.as_str());
        if target == term {
            continue;
        }
        let Some(postings) = index.postings.remove(&term) else { continue };
        match index.postings.get_mut(&target) {
            Some(existing) => merge_postings(existing, postings),
            None => { index.postings.insert(target, postings); }
        }
    }
}

/// Union `incoming` into `existing`, leaving it ascending and duplicate-free.
pub fn merge_postings(existing: &mut Vec<DocId>, incoming: Vec<DocId>) {
    existing.extend(incoming);
    existing.sort_unstable();
    existing.dedup();
}
