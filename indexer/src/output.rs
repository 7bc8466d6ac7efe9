use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tfidf_core::QueryResult;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `query  doc  rank  score` lines, one block per query
    #[default]
    Trec,
    /// One JSON object per ranked document
    Json,
}

#[derive(Serialize)]
struct JsonHit<'a> {
    batch: &'a str,
    query_id: &'a str,
    doc_id: &'a str,
    rank: usize,
    score: f64,
}

pub fn trec_line(query_id: &str, doc_id: &str, rank: usize, score: f64) -> String {
    format!("{query_id}    {doc_id}    {rank}    {score:.6}")
}

/// Writes ranked results, counting the lines it emits.
pub struct ResultWriter<W: Write> {
    out: W,
    format: OutputFormat,
    lines: usize,
}

impl<W: Write> ResultWriter<W> {
    pub fn new(out: W, format: OutputFormat) -> Self {
        Self { out, format, lines: 0 }
    }

    /// In TREC format every block ends with a newline, so a query without
    /// hits leaves an empty line.
    pub fn write_block(&mut self, batch: &str, result: &QueryResult) -> io::Result<()> {
        match self.format {
            OutputFormat::Trec => {
                for (i, entry) in result.entries.iter().enumerate() {
                    if i > 0 {
                        self.out.write_all(b"\n")?;
                    }
                    let line = trec_line(&result.query_id, &entry.doc_id, i + 1, entry.score);
                    self.out.write_all(line.as_bytes())?;
                    self.lines += 1;
                }
                self.out.write_all(b"\n")?;
            }
            OutputFormat::Json => {
                for (i, entry) in result.entries.iter().enumerate() {
                    let hit = JsonHit {
                        batch,
                        query_id: &result.query_id,
                        doc_id: &entry.doc_id,
                        rank: i + 1,
                        score: entry.score,
                    };
                    serde_json::to_writer(&mut self.out, &hit)?;
                    self.out.write_all(b"\n")?;
                    self.lines += 1;
                }
            }
        }
        Ok(())
    }

    pub fn lines(&self) -> usize {
        self.lines
    }

    pub fn finish(mut self) -> io::Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}
