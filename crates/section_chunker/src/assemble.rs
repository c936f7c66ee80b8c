// src/assemble.rs

use tracing::debug;

use crate::blocks::{split_protected, Block};
use crate::config::ChunkerConfig;
use crate::error::Result;
use crate::merge::merge_short_sections;
use crate::metadata::Chunk;
use crate::section::{document_title, parse_sections};
use crate::window::SlidingWindow;

/// Turn a Markdown document into ordered chunks.
///
/// The configuration is validated before any work is done. After that the
/// call cannot fail: empty input, or input without level 2-6 headings,
/// yields an empty vector.
pub fn assemble(markdown: &str, config: &ChunkerConfig) -> Result<Vec<Chunk>> {
    let window = SlidingWindow::new(config.max_tokens, config.overlap)?;
    Ok(assemble_with(markdown, window, config.min_tokens))
}

/// Positional form of [`assemble`].
pub fn chunk_markdown(
    markdown: &str,
    max_tokens: usize,
    overlap: usize,
    min_tokens: usize,
) -> Result<Vec<Chunk>> {
    assemble(
        markdown,
        &ChunkerConfig {
            max_tokens,
            overlap,
            min_tokens,
        },
    )
}

pub(crate) fn assemble_with(markdown: &str, window: SlidingWindow, min_tokens: usize) -> Vec<Chunk> {
    let doc_title = document_title(markdown);
    let sections = merge_short_sections(parse_sections(markdown), min_tokens);

    let mut chunks = Vec::new();
    let mut next_id = 1;

    for section in &sections {
        for block in split_protected(&section.content) {
            let pieces = match block {
                Block::Protected { text, .. } => vec![text.to_string()],
                Block::Prose(text) => window.split(text),
            };

            for content in pieces {
                chunks.push(Chunk {
                    doc_title: doc_title.clone(),
                    section: section.heading.clone(),
                    chunk_id: next_id,
                    content,
                });
                next_id += 1;
            }
        }
    }

    debug!(
        doc_title = %doc_title,
        sections = sections.len(),
        chunks = chunks.len(),
        "chunked markdown document"
    );

    chunks
}
