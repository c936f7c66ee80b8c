// src/section.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::token_counter::TokenCounter;

/// Title attached to chunks of a document without a level-2 heading
pub const UNTITLED_DOCUMENT: &str = "Untitled Document";

// Levels 2-6 only; `#` is the document title and never starts a section.
static RE_SECTION_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{2,6})[ \t]+(.*)").expect("valid section heading regex")
});
static RE_TITLE_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.*)").expect("valid title heading regex"));

/// A heading-delimited span of a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub heading: String,
    /// Heading level, 2 through 6
    pub level: u8,
    /// Text between this heading line and the next heading, trimmed
    pub content: String,
}

impl Section {
    pub fn new(heading: impl Into<String>, level: u8, content: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            level,
            content: content.into(),
        }
    }

    pub fn token_count(&self) -> usize {
        TokenCounter::count(&self.content)
    }

    /// Fold this section into the one that follows it.
    ///
    /// The result keeps `next`'s level; headings are joined with `" + "` and
    /// contents with a blank line.
    pub fn fold_into(self, next: Section) -> Section {
        Section {
            heading: format!("{} + {}", self.heading, next.heading),
            level: next.level,
            content: format!("{}\n\n{}", self.content, next.content),
        }
    }
}

/// Partition `markdown` into sections at every level 2-6 heading.
///
/// Text before the first such heading belongs to no section. A document
/// without any yields an empty vector.
pub fn parse_sections(markdown: &str) -> Vec<Section> {
    let headings: Vec<HeadingMatch> = RE_SECTION_HEADING
        .captures_iter(markdown)
        .filter_map(|caps| {
            let line = caps.get(0)?;
            Some(HeadingMatch {
                start: line.start(),
                end: line.end(),
                level: caps.get(1)?.len() as u8,
                text: caps.get(2)?.as_str().trim(),
            })
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, heading)| {
            let end = headings.get(i + 1).map_or(markdown.len(), |next| next.start);
            Section {
                heading: heading.text.to_string(),
                level: heading.level,
                content: markdown[heading.end..end].trim().to_string(),
            }
        })
        .collect()
}

/// Byte span and parts of one heading line
struct HeadingMatch<'a> {
    start: usize,
    end: usize,
    level: u8,
    text: &'a str,
}

/// Title of the document: the first `## ` heading anywhere in the raw text,
/// or [`UNTITLED_DOCUMENT`].
pub fn document_title(markdown: &str) -> String {
    RE_TITLE_HEADING
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map_or_else(
            || UNTITLED_DOCUMENT.to_string(),
            |title| title.as_str().trim().to_string(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections() {
        let markdown = "# Paper\n\nPreamble.\n\n## Intro\n\nFirst part.\n\n### Detail\nSecond part.\n";
        let sections = parse_sections(markdown);

        assert_eq!(
            sections,
            vec![
                Section::new("Intro", 2, "First part."),
                Section::new("Detail", 3, "Second part."),
            ]
        );
    }

    #[test]
    fn test_level_one_is_not_a_boundary() {
        let sections = parse_sections("## A\nalpha\n# Not a section\nbeta");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].content, "alpha\n# Not a section\nbeta");
    }

    #[test]
    fn test_heading_requires_space() {
        assert!(parse_sections("##NoSpace\ntext").is_empty());
        assert!(parse_sections("####### seven\ntext").is_empty());
    }

    #[test]
    fn test_all_levels_recognized() {
        let markdown = "## two\n### three\n#### four\n##### five\n###### six\n";
        let levels: Vec<u8> = parse_sections(markdown).iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_heading_text_trimmed() {
        let sections = parse_sections("##   Spaced out   \r\nbody\r\n");
        assert_eq!(sections[0].heading, "Spaced out");
        assert_eq!(sections[0].content, "body");
    }

    #[test]
    fn test_empty_section_content() {
        let sections = parse_sections("## First\n## Second\ntext");
        assert_eq!(sections[0].content, "");
        assert_eq!(sections[1].content, "text");
    }

    #[test]
    fn test_no_headings() {
        assert!(parse_sections("").is_empty());
        assert!(parse_sections("# Only a title\n\nSome prose.").is_empty());
    }

    #[test]
    fn test_heading_must_start_line() {
        assert!(parse_sections("text ## not heading").is_empty());
    }

    #[test]
    fn test_document_title() {
        assert_eq!(document_title("# Top\n### Deep\n## ĐÁNH GIÁ \n## Later"), "ĐÁNH GIÁ");
        assert_eq!(document_title("# Top\n### Deep"), UNTITLED_DOCUMENT);
        assert_eq!(document_title(""), UNTITLED_DOCUMENT);
    }

    #[test]
    fn test_fold_into() {
        let merged = Section::new("A", 2, "alpha").fold_into(Section::new("B", 3, "beta"));
        assert_eq!(merged, Section::new("A + B", 3, "alpha\n\nbeta"));
    }
}
