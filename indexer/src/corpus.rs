use crate::tokenizer::tokenize;
use anyhow::{bail, Result};
use index_core::TokenizedDoc;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One corpus record. Either `tokens` is given, or `body` is tokenized here.
#[derive(Debug, Deserialize)]
struct InputDoc {
    id: serde_json::Value,
    #[serde(default)]
    tokens: Option<Vec<String>>,
    #[serde(default)]
    body: Option<String>,
}

impl InputDoc {
    fn into_tokenized(self) -> Result<TokenizedDoc> {
        let id = match self.id {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => bail!("unsupported document id {other}"),
        };
        let tokens = match (self.tokens, self.body) {
            (Some(tokens), _) => tokens,
            (None, Some(body)) => tokenize(&body),
            (None, None) => Vec::new(),
        };
        Ok(TokenizedDoc { id, tokens })
    }
}

/// Load every document from a JSON/JSONL file, or from all such files under a
/// directory (visited in path order).
pub fn load_corpus(input: &Path) -> Result<Vec<TokenizedDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input {} does not exist", input.display());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            load_jsonl(&file, &mut docs)?;
        } else {
            load_json(&file, &mut docs)?;
        }
    }
    tracing::info!(docs = docs.len(), "corpus loaded");
    Ok(docs)
}

fn load_jsonl(file: &Path, docs: &mut Vec<TokenizedDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)?;
        docs.push(doc.into_tokenized()?);
    }
    Ok(())
}

fn load_json(file: &Path, docs: &mut Vec<TokenizedDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let doc: InputDoc = serde_json::from_value(v)?;
                docs.push(doc.into_tokenized()?);
            }
        }
        serde_json::Value::Object(_) => {
            let doc: InputDoc = serde_json::from_value(json)?;
            docs.push(doc.into_tokenized()?);
        }
        _ => tracing::warn!(file = %file.display(), "skipping non-document json"),
    }
    Ok(())
}
