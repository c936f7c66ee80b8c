// src/window.rs

use crate::config::{DEFAULT_MAX_TOKENS, DEFAULT_OVERLAP};
use crate::error::{ChunkerError, Result};
use crate::token_counter::TokenCounter;

/// Fixed-size word windows with overlap between consecutive windows.
///
/// Construction validates `overlap < max_tokens`, so [`SlidingWindow::split`]
/// always advances and cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlidingWindow {
    max_tokens: usize,
    overlap: usize,
}

impl Default for SlidingWindow {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl SlidingWindow {
    pub fn new(max_tokens: usize, overlap: usize) -> Result<Self> {
        if overlap >= max_tokens {
            return Err(ChunkerError::InvalidOverlap {
                overlap,
                max_tokens,
            });
        }
        Ok(Self {
            max_tokens,
            overlap,
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    /// Words the window start moves forward by each step
    pub fn stride(&self) -> usize {
        self.max_tokens - self.overlap
    }

    /// Split `text` into windows of at most `max_tokens` words.
    ///
    /// Text that already fits is returned unchanged as the only element.
    /// Longer text is re-joined with single spaces, so original spacing is
    /// not preserved. The last window always ends at the final word.
    pub fn split(&self, text: &str) -> Vec<String> {
        if TokenCounter::count(text) <= self.max_tokens {
            return vec![text.to_string()];
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let total = words.len();
        let mut windows = Vec::with_capacity(total.div_ceil(self.stride()));
        let mut start = 0;

        loop {
            let end = (start + self.max_tokens).min(total);
            windows.push(words[start..end].join(" "));
            if end == total {
                break;
            }
            start = end - self.overlap;
        }

        windows
    }
}

/// Split `text` into overlapping word windows.
///
/// Fails with [`ChunkerError::InvalidOverlap`] when `overlap >= max_tokens`.
pub fn split_with_overlap(text: &str, max_tokens: usize, overlap: usize) -> Result<Vec<String>> {
    Ok(SlidingWindow::new(max_tokens, overlap)?.split(text))
}
