// src/config.rs

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::window::SlidingWindow;

/// Default window size in words for prose
pub const DEFAULT_MAX_TOKENS: usize = 200;

/// Default number of words repeated between consecutive windows
pub const DEFAULT_OVERLAP: usize = 50;

/// Default minimum word count for a section to stand alone
pub const DEFAULT_MIN_TOKENS: usize = 50;

/// Chunking parameters, all counted in whitespace-delimited words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkerConfig {
    pub max_tokens: usize,
    pub overlap: usize,
    pub min_tokens: usize,
}

impl Default for ChunkerConfig {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_OVERLAP,
            min_tokens: DEFAULT_MIN_TOKENS,
        }
    }
}

impl ChunkerConfig {
    /// Settings used when ingesting converted PDFs and scraped pages:
    /// 500-word windows, 100 words of overlap, sections under 200 words merged.
    pub fn ingest() -> Self {
        Self {
            max_tokens: 500,
            overlap: 100,
            min_tokens: 200,
        }
    }

    /// Reject configurations whose window would never advance.
    ///
    /// Same rule as [`SlidingWindow::new`], which owns the check.
    pub fn validate(&self) -> Result<()> {
        SlidingWindow::new(self.max_tokens, self.overlap).map(|_| ())
    }
}
