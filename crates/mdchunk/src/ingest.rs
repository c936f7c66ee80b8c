//! Input discovery, parallel chunking and JSON Lines output.

use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use indicatif::ProgressBar;
use rayon::prelude::*;
use section_chunker::{Chunk, Chunker};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown"];

/// What each output line carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `doc_title`, `section`, `chunk_id`, `content`
    Chunks,
    /// Vector-store shape: `id`, `document`, `metadata`
    Records,
}

/// Chunks produced for one input file
#[derive(Debug)]
pub struct DocumentChunks {
    pub source: PathBuf,
    pub chunks: Vec<Chunk>,
}

#[derive(Serialize)]
struct OutputLine<'a, T: Serialize> {
    source: &'a str,
    #[serde(flatten)]
    item: T,
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MARKDOWN_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand the command-line inputs into Markdown files.
///
/// Files are taken as given. Directories contribute their `.md` and
/// `.markdown` files (not recursive), sorted by name.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = std::fs::read_dir(input)
                .with_context(|| format!("Failed to read directory: {}", input.display()))?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_markdown(path))
                .collect();
            found.sort();

            if found.is_empty() {
                warn!("No Markdown files found in directory {}", input.display());
            }
            files.extend(found);
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("Input not found: {}", input.display());
        }
    }

    Ok(files)
}

/// Read and chunk every file in parallel, one independent chunker call per
/// document. Results keep the order of `paths`.
pub fn chunk_documents(
    paths: &[PathBuf],
    chunker: &Chunker,
    progress: &ProgressBar,
) -> Vec<Result<DocumentChunks>> {
    paths
        .par_iter()
        .map(|path| {
            let result = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))
                .map(|markdown| {
                    let chunks = chunker.chunk(&markdown);
                    debug!(source = %path.display(), chunks = chunks.len(), "chunked document");
                    DocumentChunks {
                        source: path.clone(),
                        chunks,
                    }
                });
            progress.inc(1);
            result
        })
        .collect()
}

/// Write one JSON object per chunk, tagged with its source path.
/// Returns the number of lines written.
pub fn write_jsonl<W: Write>(
    writer: &mut W,
    document: &DocumentChunks,
    format: OutputFormat,
) -> Result<usize> {
    let source = document.source.to_string_lossy();

    for chunk in &document.chunks {
        match format {
            OutputFormat::Chunks => serde_json::to_writer(
                &mut *writer,
                &OutputLine {
                    source: &source,
                    item: chunk,
                },
            ),
            OutputFormat::Records => serde_json::to_writer(
                &mut *writer,
                &OutputLine {
                    source: &source,
                    item: chunk.to_record(),
                },
            ),
        }
        .context("Failed to serialize chunk")?;
        writer.write_all(b"\n").context("Failed to write output")?;
    }

    Ok(document.chunks.len())
}
