// src/error.rs
//! Error types for section_chunker

use thiserror::Error;

/// Result type for chunking operations
pub type Result<T> = std::result::Result<T, ChunkerError>;

/// Errors raised by the chunker.
///
/// Chunking itself is total: any input string produces a (possibly empty)
/// chunk list. The only failure is a window configuration that would never
/// advance.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChunkerError {
    /// Overlap must be strictly smaller than the window size
    #[error("invalid window configuration: overlap ({overlap}) must be less than max_tokens ({max_tokens})")]
    InvalidOverlap { overlap: usize, max_tokens: usize },
}
