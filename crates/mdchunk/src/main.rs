//! mdchunk - chunk cleaned Markdown for embedding
//!
//! Reads Markdown produced by the document-conversion stage, splits each
//! document into section-tagged chunks and writes them as JSON Lines for the
//! embedding and vector-store stages.
//!
//! Usage:
//!   mdchunk paper.md                      Chunk one document to stdout
//!   mdchunk docs/ -o chunks.jsonl         Chunk every .md file in a directory
//!   mdchunk docs/ --ingest-defaults       Use 500/100/200 word settings
//!   mdchunk docs/ --format records        Emit id/document/metadata records

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use section_chunker::{Chunker, ChunkerConfig};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod ingest;

use config::{default_config_path, load_config, ChunkingConfig};
use ingest::{chunk_documents, discover_inputs, write_jsonl, OutputFormat};

#[derive(Parser)]
#[command(name = "mdchunk")]
#[command(about = "Split Markdown documents into overlapping, section-tagged chunks")]
#[command(version)]
struct Args {
    /// Markdown files or directories containing .md files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Prose window size in words
    #[arg(long)]
    max_tokens: Option<usize>,

    /// Words shared by consecutive windows (must be below --max-tokens)
    #[arg(long)]
    overlap: Option<usize>,

    /// Sections with fewer words are merged into the next section
    #[arg(long)]
    min_tokens: Option<usize>,

    /// Start from the ingestion settings (500 / 100 / 200) instead of 200 / 50 / 50
    #[arg(long)]
    ingest_defaults: bool,

    /// Output record shape
    #[arg(long, value_enum, default_value = "chunks")]
    format: OutputFormat,

    /// Write JSON Lines here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Treat a document that yields no chunks as a failure
    #[arg(long)]
    fail_on_empty: bool,

    /// Log level when RUST_LOG is not set (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Show a progress bar on stderr
    #[arg(long)]
    progress: bool,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_chunker(args: &Args) -> Result<Chunker> {
    let config = match &args.config {
        Some(path) if !path.exists() => bail!("Config file not found: {}", path.display()),
        Some(path) => load_config(path)?,
        None => load_config(&default_config_path()?)?,
    };

    let base = if args.ingest_defaults {
        ChunkerConfig::ingest()
    } else {
        ChunkerConfig::default()
    };
    let cli = ChunkingConfig {
        max_tokens: args.max_tokens,
        overlap: args.overlap,
        min_tokens: args.min_tokens,
    };
    let resolved = config.resolve(base, &cli)?;
    info!(
        max_tokens = resolved.max_tokens,
        overlap = resolved.overlap,
        min_tokens = resolved.min_tokens,
        "chunking configuration"
    );

    Ok(Chunker::new(resolved)?)
}

fn progress_bar(enabled: bool, len: usize) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} documents")
            .context("Invalid progress bar template")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

fn run(args: &Args) -> Result<()> {
    let chunker = resolve_chunker(args)?;
    let paths = discover_inputs(&args.inputs)?;
    if paths.is_empty() {
        warn!("No documents to chunk");
        return Ok(());
    }

    let progress = progress_bar(args.progress, paths.len())?;
    let results = chunk_documents(&paths, &chunker, &progress);
    progress.finish_and_clear();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(std::fs::File::create(path).with_context(
            || format!("Failed to create output file: {}", path.display()),
        )?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut written = 0;
    let mut failed = 0;
    for result in &results {
        let document = match result {
            Ok(document) => document,
            Err(err) => {
                error!("{err:#}");
                failed += 1;
                continue;
            }
        };

        if document.chunks.is_empty() {
            if args.fail_on_empty {
                error!("No chunks produced for {}", document.source.display());
                failed += 1;
                continue;
            }
            warn!("No chunks produced for {}", document.source.display());
        }
        written += write_jsonl(&mut writer, document, args.format)?;
    }
    writer.flush().context("Failed to flush output")?;

    info!(
        documents = results.len(),
        failed,
        chunks = written,
        "chunking finished"
    );

    if failed > 0 {
        bail!("{failed} of {} documents failed", results.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);
    run(&args)
}
