mod corpus;
mod tokenizer;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use corpus::load_corpus;
use index_core::corpus::{pair_count, truncate_pairs};
use index_core::{
    and_query, compression_steps, naive_index, one_word_compression, single_query, spimi_index, DocId,
    InvertedIndex, Query, QueryMiss, TokenizedDoc,
};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build, query and compress an in-memory inverted index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Method {
    Naive,
    Spimi,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query (single term or `a AND b ...`) against a fresh index
    Query {
        /// Corpus path (JSON/JSONL file or directory)
        #[arg(long)]
        input: PathBuf,
        /// Construction algorithm
        #[arg(long, value_enum, default_value_t = Method::Naive)]
        method: Method,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        query: String,
    },
    /// Run the sample queries: three single-term lines, then three AND lines
    Samples {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "samples.txt")]
        samples: PathBuf,
        /// Compress the index and normalize every query term first
        #[arg(long, default_value_t = false)]
        compressed: bool,
    },
    /// Compress a naive index and write the loss report and stopword list
    Compress {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = ".")]
        report_dir: PathBuf,
    },
    /// Compare construction time of both builders on the first N term/doc-id pairs
    Timing {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 10_000)]
        pairs: usize,
    },
    /// Run the fixed challenge queries on both indexes and record results and timings
    Challenge {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "challengeruns.txt")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { input, method, json, query } => run_query(&input, method, json, &query),
        Commands::Samples { input, samples, compressed } => run_samples(&input, &samples, compressed),
        Commands::Compress { input, report_dir } => run_compress(&input, &report_dir),
        Commands::Timing { input, pairs } => run_timing(&input, pairs),
        Commands::Challenge { input, output } => run_challenge(&input, &output),
    }
}

fn build(corpus: &[TokenizedDoc], method: Method) -> Result<InvertedIndex> {
    let index = match method {
        Method::Naive => naive_index(corpus)?,
        Method::Spimi => spimi_index(corpus)?,
    };
    Ok(index)
}

/// Dispatch on query shape; single terms return their postings untouched.
fn answer_query(index: &InvertedIndex, query: &Query) -> Result<Vec<DocId>, QueryMiss> {
    match query {
        Query::Single(term) => single_query(index, term).map(<[DocId]>::to_vec),
        Query::And(terms) => and_query(index, terms),
    }
}

fn answer(index: &InvertedIndex, raw: &str) -> Result<Vec<DocId>, QueryMiss> {
    answer_query(index, &Query::parse(raw))
}

/// Same as `answer_query`, but against a compressed index. `original` is the
/// index before compression, used to derive the stopword lists for
/// normalization. A term filtered out by normalization is reported as missing.
fn answer_compressed(index: &InvertedIndex, original: &InvertedIndex, query: &Query) -> Result<Vec<DocId>, QueryMiss> {
    match query {
        Query::Single(term) => {
            let normalized = one_word_compression(term, original)
                .ok_or_else(|| QueryMiss::TermNotFound { term: term.to_string() })?;
            single_query(index, &normalized).map(<[DocId]>::to_vec)
        }
        Query::And(terms) => {
            let mut normalized = Vec::with_capacity(terms.len());
            for term in terms {
                match one_word_compression(term, original) {
                    Some(t) => normalized.push(t),
                    None => return Err(QueryMiss::ConjunctMissing { term: term.to_string() }),
                }
            }
            and_query(index, &normalized)
        }
    }
}

fn describe(result: &Result<Vec<DocId>, QueryMiss>) -> String {
    match result {
        Ok(ids) => format!("{ids:?}"),
        Err(miss) => format!("None ({miss})"),
    }
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    method: Method,
    result: Option<&'a [DocId]>,
    miss: Option<String>,
}

fn run_query(input: &Path, method: Method, json: bool, query: &str) -> Result<()> {
    let corpus = load_corpus(input)?;
    let index = build(&corpus, method)?;
    let result = answer(&index, query);
    if json {
        let out = QueryOutput {
            query,
            method,
            result: result.as_ref().ok().map(Vec::as_slice),
            miss: result.as_ref().err().map(ToString::to_string),
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", describe(&result));
    }
    Ok(())
}

fn read_samples(path: &Path) -> Result<Vec<String>> {
    let reader = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let lines = reader.lines().collect::<std::io::Result<Vec<_>>>()?;
    Ok(lines.into_iter().map(|l| l.trim_end().to_string()).collect())
}

fn run_samples(input: &Path, samples: &Path, compressed: bool) -> Result<()> {
    let corpus = load_corpus(input)?;
    let original = naive_index(&corpus)?;
    let lines = read_samples(samples)?;

    let compressed_index = if compressed {
        let mut index = original.clone();
        let report = compression_steps(&mut index);
        print!("{report}");
        Some(index)
    } else {
        None
    };

    for (i, line) in lines.iter().take(6).enumerate() {
        let query = if i < 3 { Query::Single(line.as_str()) } else { Query::parse(line) };
        let result = match &compressed_index {
            None => answer_query(&original, &query),
            Some(index) => answer_compressed(index, &original, &query),
        };
        println!("Query: {line} : {}", describe(&result));
    }
    Ok(())
}

fn run_compress(input: &Path, report_dir: &Path) -> Result<()> {
    let corpus = load_corpus(input)?;
    let mut index = naive_index(&corpus)?;
    let report = compression_steps(&mut index);
    fs::create_dir_all(report_dir)?;
    report.write_to(report_dir.join("compression.txt"))?;
    report.stoplist_large.write_to(report_dir.join("stopwords.txt"))?;
    print!("{report}");
    tracing::info!(report_dir = %report_dir.display(), "compression report written");
    Ok(())
}

fn run_timing(input: &Path, pairs: usize) -> Result<()> {
    let corpus = truncate_pairs(&load_corpus(input)?, pairs);
    tracing::info!(pairs = pair_count(&corpus), "timing builders");

    let start = Instant::now();
    naive_index(&corpus)?;
    let naive = start.elapsed();

    let start = Instant::now();
    spimi_index(&corpus)?;
    let spimi = start.elapsed();

    println!(
        "Time to create the naive index based on {} pairs is {:.6}s and the time to create the spimi index is {:.6}s.",
        pair_count(&corpus),
        naive.as_secs_f64(),
        spimi.as_secs_f64()
    );
    Ok(())
}

const CHALLENGE_AND: [&str; 2] = ["Chrysler", "Bundesbank"];
const CHALLENGE_SINGLE: [&str; 4] = ["pineapple", "copper", "Chrysler", "Bundesbank"];

fn run_challenge(input: &Path, output: &Path) -> Result<()> {
    let corpus = load_corpus(input)?;
    let indexes = [("naive", naive_index(&corpus)?), ("spimi", spimi_index(&corpus)?)];
    let mut f = File::create(output)?;

    for (name, index) in &indexes {
        let start = Instant::now();
        let result = and_query(index, &CHALLENGE_AND);
        let took = start.elapsed().as_secs_f64();
        writeln!(f, "{} {took}s for {name} index to run {}", describe(&result), CHALLENGE_AND.join(" AND "))?;
        for term in CHALLENGE_SINGLE {
            let start = Instant::now();
            let result = single_query(index, term).map(<[DocId]>::to_vec);
            let took = start.elapsed().as_secs_f64();
            writeln!(f, "{} {took}s for {name} index to run {term}", describe(&result))?;
        }
    }
    tracing::info!(output = %output.display(), "challenge runs complete");
    Ok(())
}
