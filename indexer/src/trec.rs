//! TREC-style input: `<DOC>` collections, topic files and stop-word lists.

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tfidf_core::{Batch, Query, StopWords, Tokenizer};
use walkdir::WalkDir;

lazy_static! {
    static ref DOC: Regex = Regex::new(r"(?s)<DOC>.*?</DOC>").expect("valid regex");
    static ref DOCNO: Regex = Regex::new(r"(?s)<DOCNO>(.*?)</DOCNO>").expect("valid regex");
    static ref TEXT: Regex = Regex::new(r"(?s)<TEXT>(.*?)</TEXT>").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub id: String,
    pub text: String,
}

/// Extract every `<DOC>` block. The id is the `<DOCNO>` with all whitespace
/// removed and the text is the trimmed `<TEXT>` body; blocks missing either
/// are skipped.
pub fn parse_documents(content: &str) -> Vec<RawDocument> {
    let mut docs = Vec::new();
    for block in DOC.find_iter(content) {
        let block = block.as_str();
        let Some(id) = DOCNO.captures(block).and_then(|c| c.get(1)) else {
            tracing::warn!(snippet = %preview(block), "skipping <DOC> without <DOCNO>");
            continue;
        };
        let id: String = id.as_str().chars().filter(|c| !c.is_whitespace()).collect();
        let Some(text) = TEXT.captures(block).and_then(|c| c.get(1)) else {
            tracing::warn!(doc_id = %id, "skipping <DOC> without <TEXT>");
            continue;
        };
        docs.push(RawDocument { id, text: text.as_str().trim().to_string() });
    }
    docs
}

/// Scan a topic file line by line: `<num>` and `<title>` lines carry their
/// value after the last `:` (or after the tag), and `</top>` closes the
/// topic. Topics missing either value are dropped. Order is first
/// appearance; a repeated number replaces the earlier title.
pub fn parse_topics(content: &str) -> Vec<Query> {
    let mut queries: Vec<Query> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut number: Option<String> = None;
    let mut title: Option<String> = None;
    for line in content.lines() {
        if line.contains("<num>") {
            number = Some(field_value(line, "<num>"));
        } else if line.contains("<title>") {
            title = Some(field_value(line, "<title>"));
        } else if line.contains("</top>") {
            let (Some(id), Some(text)) = (number.take(), title.take()) else {
                continue;
            };
            if id.is_empty() || text.is_empty() {
                continue;
            }
            match positions.get(&id) {
                Some(&pos) => queries[pos].text = text,
                None => {
                    positions.insert(id.clone(), queries.len());
                    queries.push(Query { id, text });
                }
            }
        }
    }
    queries
}

/// Text after the last `:` on the line, or after the tag when there is none.
fn field_value(line: &str, tag: &str) -> String {
    let value = match line.rfind(':') {
        Some(i) => &line[i + 1..],
        None => line.split_once(tag).map_or(line, |(_, rest)| rest),
    };
    value.trim().to_string()
}

fn preview(block: &str) -> String {
    block.chars().take(60).collect()
}

/// Read a file as text, dropping invalid UTF-8 sequences.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_dropping_invalid(&bytes))
}

/// Decode UTF-8, skipping malformed sequences so the bytes on either side
/// join up: `na\xEFve` reads as `nave`.
fn decode_dropping_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                if let Ok(valid) = std::str::from_utf8(valid) {
                    out.push_str(valid);
                }
                let skip = e.error_len().unwrap_or(rest.len());
                bytes = &rest[skip..];
            }
        }
    }
}

/// One document file becomes one batch, labelled with its file name.
pub fn load_batch(path: &Path, tokenizer: &Tokenizer) -> Result<Batch> {
    let content = read_text(path)?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let docs = parse_documents(&content);
    tracing::debug!(batch = %label, num_docs = docs.len(), "parsed document file");
    Ok(Batch::from_texts(label, docs.into_iter().map(|d| (d.id, d.text)), tokenizer))
}

pub fn load_topics(path: &Path) -> Result<Vec<Query>> {
    Ok(parse_topics(&read_text(path)?))
}

/// The built-in English list when `path` is `None`.
pub fn load_stop_words(path: Option<&Path>) -> Result<StopWords> {
    match path {
        Some(p) => Ok(StopWords::parse(&read_text(p)?)),
        None => Ok(StopWords::english()),
    }
}

/// Document files under `input`: the file itself, or the regular files
/// directly inside a directory whose names start with `prefix`, sorted by
/// name.
pub fn discover(input: &Path, prefix: Option<&str>) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        anyhow::bail!("document input {} does not exist", input.display());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(input).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("listing {}", input.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let keep = prefix.map_or(true, |p| entry.file_name().to_string_lossy().starts_with(p));
        if keep {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
