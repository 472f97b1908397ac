use index_core::compress::{conflate, CASE_FOLDING, STEMMING};
use index_core::normalize::{case_fold, stem};
use index_core::{
    and_query, calculate_size, compression_steps, naive_index, normalize_query, one_word_compression,
    single_query, IndexSize, TokenizedDoc,
};

#[test]
fn copper_and_running_end_to_end() {
    let corpus = vec![
        TokenizedDoc::new("1", ["Copper", "COPPER"]),
        TokenizedDoc::new("2", ["running"]),
    ];
    let mut index = naive_index(&corpus).unwrap();
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["COPPER", "Copper", "running"]);

    let report = compression_steps(&mut index);
    let folding = report.stage(CASE_FOLDING).unwrap();
    assert_eq!(folding.size, IndexSize { terms: 2, postings: 2 });

    // Both remaining terms rank inside the top-30 list of such a tiny index.
    assert!(index.is_empty());
    assert_eq!(report.stoplist_small.terms(), vec!["running", "copper"]);
}

#[test]
fn folding_then_stemming_conflates_variants() {
    let corpus = vec![
        TokenizedDoc::new("1", ["Copper", "COPPER"]),
        TokenizedDoc::new("2", ["running"]),
    ];
    let mut index = naive_index(&corpus).unwrap();
    conflate(&mut index, case_fold);
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["copper", "running"]);
    assert_eq!(index.get("copper"), Some(&[1][..]));
    conflate(&mut index, stem);
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["copper", "run"]);
}

/// A corpus large enough that real content terms survive both stopword cutoffs.
fn filler_corpus() -> Vec<TokenizedDoc> {
    let mut docs = Vec::new();
    // 180 filler words in three documents each: exactly enough to fill both
    // stopword lists ahead of the content terms.
    for i in 0..180u32 {
        let word = format!("filler{}", letters(i));
        for j in 0..3 {
            docs.push(TokenizedDoc::new((1000 + 3 * i + j).to_string(), [word.clone()]));
        }
    }
    docs.push(TokenizedDoc::new("1", ["Copper", "COPPER", "mining", "1987"]));
    docs.push(TokenizedDoc::new("2", ["running", "copper"]));
    docs.push(TokenizedDoc::new("3", ["run", "Mines"]));
    docs
}

fn letters(mut n: u32) -> String {
    let mut s = String::new();
    loop {
        s.push((b'a' + (n % 26) as u8) as char);
        n /= 26;
        if n == 0 {
            break s;
        }
    }
}

#[test]
fn compressed_index_answers_normalized_queries() {
    let corpus = filler_corpus();
    let original = naive_index(&corpus).unwrap();
    let mut index = original.clone();
    let report = compression_steps(&mut index);

    assert!(!index.contains("1987"));
    assert!(!index.contains("Copper"));
    assert_eq!(index.get("copper"), Some(&[1, 2][..]));
    assert_eq!(index.get("run"), Some(&[2, 3][..]));
    assert_eq!(index.get("mine"), Some(&[1, 3][..]));
    assert_eq!(report.stoplist_small.len(), 30);
    assert_eq!(report.stoplist_large.len(), 150);

    let term = one_word_compression("Running", &original).unwrap();
    assert_eq!(single_query(&index, &term), Ok(&[2, 3][..]));

    let terms = normalize_query(&["COPPER", "Mines"], &original).unwrap();
    assert_eq!(and_query(&index, &terms), Ok(vec![1]));
    assert_eq!(one_word_compression("abc123", &original), None);
}

#[test]
fn large_stoplist_is_ranked_after_small_one_is_removed() {
    let mut index = naive_index(&filler_corpus()).unwrap();
    let report = compression_steps(&mut index);
    for term in report.stoplist_small.terms() {
        assert!(!report.stoplist_large.contains(term), "{term} in both lists");
    }
    assert!(index.terms().all(|t| !t.starts_with("filler")), "{:?}", index.terms().collect::<Vec<_>>());
    assert_eq!(index.terms().collect::<Vec<_>>(), vec!["copper", "mine", "run"]);
}

#[test]
fn cumulative_losses_reconstruct_size() {
    let mut index = naive_index(&filler_corpus()).unwrap();
    let report = compression_steps(&mut index);
    for stage in &report.stages {
        let expected = IndexSize {
            terms: (report.initial.terms as i64 - stage.terms_total) as usize,
            postings: (report.initial.postings as i64 - stage.postings_total) as usize,
        };
        assert_eq!(stage.size, expected, "{}", stage.stage);
    }
    assert_eq!(calculate_size(&index), report.stage(STEMMING).unwrap().size);
}

#[test]
fn second_case_fold_pass_changes_nothing() {
    let mut index = naive_index(&filler_corpus()).unwrap();
    compression_steps(&mut index);
    let before = index.size();
    conflate(&mut index, case_fold);
    assert_eq!(index.size(), before);
}

#[test]
fn report_artifact_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let mut index = naive_index(&filler_corpus()).unwrap();
    let report = compression_steps(&mut index);
    let path = dir.path().join("compression.txt");
    report.write_to(&path).unwrap();
    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(text.lines().count(), 3 + 5);
    assert!(text.contains("After 'stemming': "));
}
