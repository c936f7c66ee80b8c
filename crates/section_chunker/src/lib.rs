// src/lib.rs
//! # Section Chunker
//!
//! Splits cleaned Markdown into retrieval-sized chunks for a RAG ingestion
//! pipeline. Each chunk carries the document title, the heading of the section
//! it came from, and a sequential id.
//!
//! ## Pipeline
//!
//! 1. **Sections**: the document is cut at every level 2-6 heading
//! 2. **Merge**: sections under `min_tokens` words fold into the next one
//! 3. **Blocks**: fenced code, pipe tables and bullet lists are kept whole
//! 4. **Windows**: prose is split into `max_tokens`-word windows that repeat
//!    `overlap` words of the previous window
//!
//! Tokens are whitespace-delimited words throughout.
//!
//! ## Quick Start
//!
//! ```rust
//! use section_chunker::Chunker;
//!
//! let markdown = "## Introduction\n\nThis is a test document.";
//! let chunker = Chunker::default();
//! let chunks = chunker.chunk(markdown);
//!
//! for chunk in chunks {
//!     println!("[{}] {} | {}", chunk.chunk_id, chunk.doc_title, chunk.section);
//! }
//! ```
//!
//! ## Custom Settings
//!
//! ```rust
//! use section_chunker::Chunker;
//!
//! let chunker = Chunker::builder()
//!     .max_tokens(500)
//!     .overlap(100)
//!     .min_tokens(200)
//!     .build()
//!     .expect("overlap is smaller than the window");
//!
//! let chunks = chunker.chunk("## My Document\n\nContent here.");
//! assert_eq!(chunks.len(), 1);
//! ```

pub mod assemble;
pub mod blocks;
pub mod config;
pub mod error;
pub mod merge;
pub mod metadata;
pub mod section;
pub mod token_counter;
pub mod window;

pub use assemble::{assemble, chunk_markdown};
pub use blocks::{split_protected, Block, BlockKind};
pub use config::ChunkerConfig;
pub use error::{ChunkerError, Result};
pub use merge::merge_short_sections;
pub use metadata::{Chunk, ChunkRecord, RecordMetadata};
pub use section::{document_title, parse_sections, Section, UNTITLED_DOCUMENT};
pub use window::{split_with_overlap, SlidingWindow};

/// Main chunker interface for markdown text.
///
/// Holds an already validated configuration, so [`Chunker::chunk`] never
/// fails. A chunker has no mutable state and can be shared across threads,
/// one document per call.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    window: SlidingWindow,
    min_tokens: usize,
}

impl Default for Chunker {
    /// Create a chunker with default settings.
    ///
    /// Default configuration:
    /// - max_tokens: 200
    /// - overlap: 50
    /// - min_tokens: 50
    fn default() -> Self {
        Self {
            window: SlidingWindow::default(),
            min_tokens: ChunkerConfig::default().min_tokens,
        }
    }
}

impl Chunker {
    /// Build a chunker from a configuration, rejecting `overlap >= max_tokens`.
    pub fn new(config: ChunkerConfig) -> Result<Self> {
        Ok(Self {
            window: SlidingWindow::new(config.max_tokens, config.overlap)?,
            min_tokens: config.min_tokens,
        })
    }

    /// Create a builder for custom configuration.
    pub fn builder() -> ChunkerBuilder {
        ChunkerBuilder::new()
    }

    pub fn config(&self) -> ChunkerConfig {
        ChunkerConfig {
            max_tokens: self.window.max_tokens(),
            overlap: self.window.overlap(),
            min_tokens: self.min_tokens,
        }
    }

    /// Chunk the markdown text.
    ///
    /// Chunk ids start at 1 for every call. A document without level 2-6
    /// headings produces no chunks.
    ///
    /// # Example
    ///
    /// ```rust
    /// use section_chunker::Chunker;
    ///
    /// let chunker = Chunker::default();
    /// let markdown = "## Results\n\nYield rose.\n\n| a | b |\n| 1 | 2 |";
    /// let chunks = chunker.chunk(markdown);
    ///
    /// assert_eq!(chunks[1].content, "| a | b |\n| 1 | 2 |");
    /// assert_eq!(chunks[1].chunk_id, 2);
    /// ```
    pub fn chunk(&self, text: &str) -> Vec<Chunk> {
        assemble::assemble_with(text, self.window, self.min_tokens)
    }
}

/// Builder for configuring a Chunker with custom settings.
pub struct ChunkerBuilder {
    config: ChunkerConfig,
}

impl ChunkerBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: ChunkerConfig::default(),
        }
    }

    /// Start from an existing configuration.
    pub fn from_config(config: ChunkerConfig) -> Self {
        Self { config }
    }

    /// Set the prose window size in words.
    ///
    /// Default: 200
    pub fn max_tokens(mut self, max: usize) -> Self {
        self.config.max_tokens = max;
        self
    }

    /// Set the number of words shared by consecutive windows.
    ///
    /// Must be smaller than `max_tokens`.
    ///
    /// Default: 50
    pub fn overlap(mut self, overlap: usize) -> Self {
        self.config.overlap = overlap;
        self
    }

    /// Set the minimum word count for a section to stand alone.
    ///
    /// Shorter sections are folded into the section after them.
    ///
    /// Default: 50
    pub fn min_tokens(mut self, min: usize) -> Self {
        self.config.min_tokens = min;
        self
    }

    /// Build the Chunker, validating the window settings.
    pub fn build(self) -> Result<Chunker> {
        Chunker::new(self.config)
    }
}

impl Default for ChunkerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
