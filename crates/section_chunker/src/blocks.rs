// src/blocks.rs

use serde::{Deserialize, Serialize};

/// Structural content that is never split across chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    CodeFence,
    Table,
    List,
}

/// A unit of section content, borrowed from the section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block<'a> {
    /// Kept verbatim as a single chunk
    Protected { kind: BlockKind, text: &'a str },
    /// Eligible for sliding-window splitting
    Prose(&'a str),
}

impl<'a> Block<'a> {
    pub fn text(&self) -> &'a str {
        match *self {
            Block::Protected { text, .. } | Block::Prose(text) => text,
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(self, Block::Protected { .. })
    }
}

/// Prefix matchers in priority order. Fences come first: a fence body may
/// hold pipes and bullets of its own.
const MATCHERS: [(BlockKind, fn(&str) -> bool); 3] = [
    (BlockKind::CodeFence, starts_with_fence),
    (BlockKind::Table, starts_with_pipe),
    (BlockKind::List, starts_with_bullet),
];

fn starts_with_fence(text: &str) -> bool {
    text.starts_with("```")
}

fn starts_with_pipe(text: &str) -> bool {
    text.starts_with('|')
}

fn starts_with_bullet(text: &str) -> bool {
    text.starts_with(['-', '*'])
}

/// Classify one candidate span by its first characters after trimming.
///
/// This is a coarse check, not a re-validation of the structure: any span
/// opening with a fence, a pipe, a hyphen or an asterisk is protected. Prose
/// that happens to begin with a dash is kept whole as a list.
/// Whitespace-only spans yield `None`.
pub fn classify(candidate: &str) -> Option<Block<'_>> {
    let text = candidate.trim();
    if text.is_empty() {
        return None;
    }

    let block = MATCHERS
        .iter()
        .find(|(_, is_match)| is_match(text))
        .map_or(Block::Prose(text), |&(kind, _)| Block::Protected { kind, text });
    Some(block)
}

/// Separate fenced code, pipe tables and bullet lists from prose.
///
/// Blocks come back in document order; whitespace-only spans are dropped.
pub fn split_protected(content: &str) -> Vec<Block<'_>> {
    BlockScanner::new(content).filter_map(classify).collect()
}

const FENCE: &str = "```";

/// Byte range of the next fence at or after `from`: an opening marker through
/// the next marker, both included. Markers pair wherever they appear, not only
/// at line starts. An unpaired marker runs to the end of the content.
fn find_fence(content: &str, from: usize) -> Option<(usize, usize)> {
    let open = from + content[from..].find(FENCE)?;
    let body = open + FENCE.len();
    let end = content[body..]
        .find(FENCE)
        .map_or(content.len(), |close| body + close + FENCE.len());
    Some((open, end))
}

/// Line span inside the scanned content; `end` excludes the line terminator.
#[derive(Debug, Clone, Copy)]
struct Line<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

/// Scanner that yields raw candidate spans: each protected structure whole,
/// and the prose between them.
///
/// Fences are cut out first by byte offset. The text between fences is then
/// scanned line by line for table and list runs.
pub struct BlockScanner<'a> {
    content: &'a str,
    /// Lines of the text segment currently being scanned
    lines: Vec<Line<'a>>,
    position: usize,
    /// Fence that follows the current text segment
    fence: Option<(usize, usize)>,
    /// Start of the content not yet split into segments
    rest: usize,
}

impl<'a> BlockScanner<'a> {
    pub fn new(content: &'a str) -> Self {
        Self {
            content,
            lines: Vec::new(),
            position: 0,
            fence: None,
            rest: 0,
        }
    }

    pub fn is_table_row(line: &str) -> bool {
        let trimmed = line.trim();
        trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
    }

    pub fn is_list_item(line: &str) -> bool {
        let mut chars = line.trim_start().chars();
        matches!(chars.next(), Some('-' | '*')) && chars.next().is_some_and(char::is_whitespace)
    }

    fn starts_structure(line: &str) -> bool {
        Self::is_table_row(line) || Self::is_list_item(line)
    }

    /// Load the text up to the next fence and remember the fence itself.
    fn load_segment(&mut self) {
        self.fence = find_fence(self.content, self.rest);
        let (text_end, next) = self
            .fence
            .unwrap_or((self.content.len(), self.content.len()));

        self.lines.clear();
        self.position = 0;
        let mut offset = self.rest;
        let content = self.content;
        for raw in content[self.rest..text_end].split_inclusive('\n') {
            let text = raw.trim_end_matches(['\n', '\r']);
            self.lines.push(Line {
                start: offset,
                end: offset + text.len(),
                text,
            });
            offset += raw.len();
        }
        self.rest = next;
    }

    fn span(&self, start: usize, end: usize) -> &'a str {
        &self.content[self.lines[start].start..self.lines[end - 1].end]
    }

    fn run_end(&self, belongs: impl Fn(&str) -> bool) -> usize {
        (self.position..self.lines.len())
            .find(|&i| !belongs(self.lines[i].text))
            .unwrap_or(self.lines.len())
    }
}

impl<'a> Iterator for BlockScanner<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.position < self.lines.len() {
                let line = self.lines[self.position].text;
                let end = if Self::is_table_row(line) {
                    self.run_end(Self::is_table_row)
                } else if Self::is_list_item(line) {
                    self.run_end(Self::is_list_item)
                } else {
                    self.run_end(|l| !Self::starts_structure(l))
                };

                let span = self.span(self.position, end);
                self.position = end;
                return Some(span);
            }

            if let Some((open, end)) = self.fence.take() {
                return Some(&self.content[open..end]);
            }

            if self.rest >= self.content.len() {
                return None;
            }
            self.load_segment();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(content: &str) -> Vec<Option<BlockKind>> {
        split_protected(content)
            .iter()
            .map(|block| match block {
                Block::Protected { kind, .. } => Some(*kind),
                Block::Prose(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_code_fence_kept_whole() {
        let content = "Before.\n\n```rust\nfn main() {\n    // | not a table\n    - not a list\n}\n```\n\nAfter.";
        let blocks = split_protected(content);

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Block::Prose("Before."));
        assert_eq!(
            blocks[1],
            Block::Protected {
                kind: BlockKind::CodeFence,
                text: "```rust\nfn main() {\n    // | not a table\n    - not a list\n}\n```",
            }
        );
        assert_eq!(blocks[2], Block::Prose("After."));
    }

    #[test]
    fn test_single_line_fence() {
        let blocks = split_protected("```echo hi```\nthen prose");
        assert_eq!(blocks[0].text(), "```echo hi```");
        assert_eq!(blocks[1], Block::Prose("then prose"));
    }

    #[test]
    fn test_unclosed_fence_runs_to_end() {
        let blocks = split_protected("Intro\n```\ncode\nmore code");
        assert_eq!(blocks.len(), 2);
        assert_eq!(
            blocks[1],
            Block::Protected {
                kind: BlockKind::CodeFence,
                text: "```\ncode\nmore code",
            }
        );
    }

    #[test]
    fn test_table_rows_grouped() {
        let blocks = split_protected("Prose above.\n|a|b|\n|---|---|\n|c|d|\nProse below.");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[1],
            Block::Protected {
                kind: BlockKind::Table,
                text: "|a|b|\n|---|---|\n|c|d|",
            }
        );
    }

    #[test]
    fn test_single_row_table() {
        assert_eq!(kinds("text\n| only |\ntext"), vec![None, Some(BlockKind::Table), None]);
    }

    #[test]
    fn test_list_grouped() {
        let blocks = split_protected("Items:\n- one\n- two\n  * nested\n* three\nDone.");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[1].text(), "- one\n- two\n  * nested\n* three");
        assert!(blocks[1].is_protected());
    }

    #[test]
    fn test_paragraphs_form_one_prose_span() {
        let blocks = split_protected("First paragraph.\n\nSecond paragraph.");
        assert_eq!(blocks, vec![Block::Prose("First paragraph.\n\nSecond paragraph.")]);
    }

    #[test]
    fn test_dash_prose_is_misread_as_list() {
        // Known limitation of the prefix classifier
        assert_eq!(kinds("-5 degrees at night, cold."), vec![Some(BlockKind::List)]);
        assert_eq!(kinds("*Emphasis* opens this line."), vec![Some(BlockKind::List)]);
    }

    #[test]
    fn test_horizontal_rule_is_not_a_list_item() {
        assert!(!BlockScanner::is_list_item("---"));
        assert!(BlockScanner::is_list_item("- item"));
        assert!(BlockScanner::is_list_item("*\titem"));
        assert!(!BlockScanner::is_list_item("-"));
    }

    #[test]
    fn test_whitespace_only_dropped() {
        assert!(split_protected("").is_empty());
        assert!(split_protected("  \n\n\t\n").is_empty());
        assert_eq!(classify("   "), None);
    }

    #[test]
    fn test_crlf_lines() {
        let blocks = split_protected("text\r\n|a|b|\r\n|c|d|\r\nmore");
        assert_eq!(blocks[1].text(), "|a|b|\r\n|c|d|");
    }

    #[test]
    fn test_scanner_spans_cover_content() {
        let content = "p1\n- a\n- b\n|x|\n```\nc\n```\np2\n";
        let spans: Vec<&str> = BlockScanner::new(content).map(str::trim).collect();
        assert_eq!(spans, vec!["p1", "- a\n- b", "|x|", "```\nc\n```", "p2"]);
    }

    #[test]
    fn test_inline_fence_inside_prose() {
        let blocks =
            split_protected("Run this ```cargo build --release --locked now please``` then continue.");
        assert_eq!(
            blocks,
            vec![
                Block::Prose("Run this"),
                Block::Protected {
                    kind: BlockKind::CodeFence,
                    text: "```cargo build --release --locked now please```",
                },
                Block::Prose("then continue."),
            ]
        );
    }

    #[test]
    fn test_fence_opened_mid_line() {
        let blocks =
            split_protected("Example code:```\nfn a() {}\nfn b() {}\n```\nAfter words here and more.");
        assert_eq!(
            blocks,
            vec![
                Block::Prose("Example code:"),
                Block::Protected {
                    kind: BlockKind::CodeFence,
                    text: "```\nfn a() {}\nfn b() {}\n```",
                },
                Block::Prose("After words here and more."),
            ]
        );
    }

    #[test]
    fn test_consecutive_fences_pair_in_order() {
        let content = "```a```\n```\nb\n```\ntail";
        assert_eq!(
            kinds(content),
            vec![Some(BlockKind::CodeFence), Some(BlockKind::CodeFence), None]
        );
    }

    #[test]
    fn test_table_after_fence_still_detected() {
        let content = "```\nx | y\n```\n|a|b|\n|c|d|\n- item";
        assert_eq!(
            kinds(content),
            vec![
                Some(BlockKind::CodeFence),
                Some(BlockKind::Table),
                Some(BlockKind::List)
            ]
        );
    }
}
