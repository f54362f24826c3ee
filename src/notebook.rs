//! Packages a pipeline run as a Jupyter notebook (nbformat 4.4).
//!
//! The notebook opens with an introduction, then one markdown heading and one
//! code cell per pipeline step, in pipeline order. Code cells hold the command
//! that reproduces the step; the step's printed output is attached as a
//! `stream` output so the notebook reads without re-running anything.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::pipeline::{Source, Step};

pub const DEFAULT_NOTEBOOK: &str = "one_piece_sentiment_analysis.ipynb";
const BIN_NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Serialize)]
pub struct Notebook {
    pub cells: Vec<Cell>,
    pub metadata: NotebookMetadata,
    pub nbformat: u32,
    pub nbformat_minor: u32,
}

#[derive(Debug, Serialize)]
#[serde(tag = "cell_type", rename_all = "lowercase")]
pub enum Cell {
    Markdown {
        metadata: Map<String, Value>,
        source: Vec<String>,
    },
    Code {
        execution_count: Option<u32>,
        metadata: Map<String, Value>,
        outputs: Vec<Output>,
        source: Vec<String>,
    },
}

#[derive(Debug, Serialize)]
#[serde(tag = "output_type", rename_all = "lowercase")]
pub enum Output {
    Stream { name: String, text: Vec<String> },
}

#[derive(Debug, Serialize)]
pub struct NotebookMetadata {
    pub kernelspec: KernelSpec,
    pub language_info: LanguageInfo,
    pub anime_reviews: GeneratorInfo,
}

#[derive(Debug, Serialize)]
pub struct KernelSpec {
    pub display_name: String,
    pub language: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct LanguageInfo {
    pub name: String,
    pub file_extension: String,
    pub mimetype: String,
}

#[derive(Debug, Serialize)]
pub struct GeneratorInfo {
    pub version: String,
    pub source: String,
    pub generated_at: DateTime<Utc>,
}

impl Cell {
    pub fn markdown(text: &str) -> Self {
        Cell::Markdown {
            metadata: Map::new(),
            source: source_lines(text),
        }
    }

    /// A code cell that has already run: `output` is what it printed.
    pub fn code(command: &str, execution_count: u32, output: &str) -> Self {
        Cell::Code {
            execution_count: Some(execution_count),
            metadata: Map::new(),
            outputs: vec![Output::Stream {
                name: "stdout".to_string(),
                text: source_lines(output),
            }],
            source: source_lines(command),
        }
    }
}

impl Notebook {
    pub fn build(source: &Source, steps: &[Step], generated_at: DateTime<Utc>) -> Self {
        let title = source.title();
        let mut cells = vec![Cell::markdown(&format!(
            "# {title} Review Analysis with Sentiment Analysis\n\
             \n\
             This notebook combines:\n\
             1. Scraping {title} reviews from {source}\n\
             2. Sentiment analysis with a word-polarity lexicon\n\
             3. Visualization of both ratings and sentiments"
        ))];

        for (i, step) in steps.iter().enumerate() {
            let command = format!("{} {} {}", BIN_NAME, source.cli_args(), step.args);
            cells.push(Cell::markdown(&format!("## {}", step.title)));
            cells.push(Cell::code(&command, i as u32 + 1, &step.output));
        }

        Self {
            cells,
            metadata: NotebookMetadata {
                kernelspec: KernelSpec {
                    display_name: "Bash".to_string(),
                    language: "bash".to_string(),
                    name: "bash".to_string(),
                },
                language_info: LanguageInfo {
                    name: "bash".to_string(),
                    file_extension: ".sh".to_string(),
                    mimetype: "text/x-sh".to_string(),
                },
                anime_reviews: GeneratorInfo {
                    version: env!("CARGO_PKG_VERSION").to_string(),
                    source: source.to_string(),
                    generated_at,
                },
            },
            nbformat: 4,
            nbformat_minor: 4,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut ser = serde_json::Serializer::with_formatter(&mut *writer, formatter);
        self.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

/// nbformat stores multi-line strings as a list of lines, each but the last
/// keeping its trailing newline.
fn source_lines(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(str::to_string).collect()
}

// ── Tests ──
