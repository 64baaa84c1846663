//! Response formatter: turns lightly marked-up model text into display
//! blocks.
//!
//! Two variants exist. [`format_chat`] works line by line and only
//! recognises bold spans inside paragraphs. [`format_analysis`] also knows
//! third-level headings and italics, and drops blank lines instead of
//! emitting spacers. Neither variant ever fails; markup it cannot pair up is
//! kept as literal text.

mod inline;

pub use inline::{parse_inline, parse_strong};

use std::sync::LazyLock;

use regex::Regex;

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\.\s").unwrap());

static NUMBERED_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. ").unwrap());

/// A run of inline text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
    Emphasis(String),
}

impl Inline {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Strong(s) | Self::Emphasis(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// Level is 2, 3 or 4.
    Heading { level: u8, content: Vec<Inline> },
    ListItem { ordered: bool, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    Spacer,
}

impl Block {
    /// The block's text with all markup removed.
    pub fn plain_text(&self) -> String {
        let content = match self {
            Self::Heading { content, .. } | Self::ListItem { content, .. } => content,
            Self::Paragraph(content) => content,
            Self::Spacer => return String::new(),
        };
        content.iter().map(Inline::text).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Chat,
    Analysis,
}

/// Format `text` with the given variant. `None` and `""` give no blocks.
pub fn format(text: Option<&str>, variant: Variant) -> Vec<Block> {
    let Some(text) = text.filter(|t| !t.is_empty()) else {
        return Vec::new();
    };
    match variant {
        Variant::Chat => format_chat(text),
        Variant::Analysis => format_analysis(text),
    }
}

fn literal(text: &str) -> Vec<Inline> {
    vec![Inline::Text(text.to_string())]
}

fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Line-by-line formatting used for chat replies.
pub fn format_chat(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }
    lines(text)
        .map(|line| {
            if let Some(rest) = line.strip_prefix("# ") {
                Block::Heading {
                    level: 2,
                    content: literal(rest),
                }
            } else if let Some(rest) = line.strip_prefix("## ") {
                Block::Heading {
                    level: 3,
                    content: literal(rest),
                }
            } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
                Block::ListItem {
                    ordered: false,
                    content: literal(rest),
                }
            } else if ORDERED_ITEM.is_match(line) {
                // The marker is "<digits>." followed by one whitespace char.
                let rest = line
                    .find('.')
                    .map(|dot| &line[dot + 1..])
                    .map(|after| {
                        let mut chars = after.chars();
                        chars.next();
                        chars.as_str()
                    })
                    .unwrap_or_default();
                Block::ListItem {
                    ordered: true,
                    content: literal(rest),
                }
            } else if line.trim().is_empty() {
                Block::Spacer
            } else {
                Block::Paragraph(parse_strong(line))
            }
        })
        .collect()
}

/// Whole-text formatting used for the results analysis.
pub fn format_analysis(text: &str) -> Vec<Block> {
    if text.is_empty() {
        return Vec::new();
    }
    lines(text)
        .filter_map(|line| {
            let block = if let Some(rest) = line.strip_prefix("# ") {
                Block::Heading {
                    level: 2,
                    content: parse_inline(rest),
                }
            } else if let Some(rest) = line.strip_prefix("## ") {
                Block::Heading {
                    level: 3,
                    content: parse_inline(rest),
                }
            } else if let Some(rest) = line.strip_prefix("### ") {
                Block::Heading {
                    level: 4,
                    content: parse_inline(rest),
                }
            } else if let Some(rest) = line.strip_prefix("* ").or_else(|| line.strip_prefix("- ")) {
                Block::ListItem {
                    ordered: false,
                    content: parse_inline(rest),
                }
            } else if let Some(m) = NUMBERED_LINE.find(line) {
                Block::ListItem {
                    ordered: true,
                    content: parse_inline(&line[m.end()..]),
                }
            } else if line.trim().is_empty() {
                return None;
            } else {
                Block::Paragraph(parse_inline(line))
            };
            Some(block)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn strong(s: &str) -> Inline {
        Inline::Strong(s.to_string())
    }

    #[test]
    fn empty_input_gives_nothing() {
        assert!(format(None, Variant::Chat).is_empty());
        assert!(format(Some(""), Variant::Chat).is_empty());
        assert!(format(None, Variant::Analysis).is_empty());
        assert!(format(Some(""), Variant::Analysis).is_empty());
    }

    #[test]
    fn chat_heading_levels() {
        assert_eq!(
            format_chat("# Title"),
            vec![Block::Heading {
                level: 2,
                content: vec![text("Title")]
            }]
        );
        assert_eq!(
            format_chat("## Sub"),
            vec![Block::Heading {
                level: 3,
                content: vec![text("Sub")]
            }]
        );
    }

    #[test]
    fn chat_lists_keep_literal_text() {
        let blocks = format_chat("* **Breathe** slowly\n- Walk\n12. Sleep early");
        assert_eq!(
            blocks,
            vec![
                Block::ListItem {
                    ordered: false,
                    content: vec![text("**Breathe** slowly")]
                },
                Block::ListItem {
                    ordered: false,
                    content: vec![text("Walk")]
                },
                Block::ListItem {
                    ordered: true,
                    content: vec![text("Sleep early")]
                },
            ]
        );
    }

    #[test]
    fn chat_paragraph_bold_and_spacer() {
        let blocks = format_chat("Try **box breathing** today.\n\nIt **helps**");
        assert_eq!(
            blocks,
            vec![
                Block::Paragraph(vec![text("Try "), strong("box breathing"), text(" today.")]),
                Block::Spacer,
                Block::Paragraph(vec![text("It "), strong("helps")]),
            ]
        );
    }

    #[test]
    fn bold_only_paragraph_has_no_asterisks() {
        let blocks = format_chat("**bold**");
        assert_eq!(blocks, vec![Block::Paragraph(vec![strong("bold")])]);
        assert_eq!(blocks[0].plain_text(), "bold");
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(
            format_chat("a **b"),
            vec![Block::Paragraph(vec![text("a **b")])]
        );
        assert_eq!(
            format_analysis("a *b"),
            vec![Block::Paragraph(vec![text("a *b")])]
        );
    }

    #[test]
    fn whitespace_only_line_is_spacer_in_chat_and_dropped_in_analysis() {
        assert_eq!(format_chat("   "), vec![Block::Spacer]);
        assert!(format_analysis("   \n\n").is_empty());
    }

    #[test]
    fn crlf_is_tolerated() {
        assert_eq!(
            format_chat("# Title\r\nbody"),
            vec![
                Block::Heading {
                    level: 2,
                    content: vec![text("Title")]
                },
                Block::Paragraph(vec![text("body")]),
            ]
        );
    }

    #[test]
    fn analysis_recognises_three_heading_levels_and_inline_markup() {
        let blocks = format_analysis(
            "# Your Results\n## Anxiety\n### Strategies\n* **Breathe** deeply\n1. Walk *daily*\n\nKeep going!",
        );
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 2,
                    content: vec![text("Your Results")]
                },
                Block::Heading {
                    level: 3,
                    content: vec![text("Anxiety")]
                },
                Block::Heading {
                    level: 4,
                    content: vec![text("Strategies")]
                },
                Block::ListItem {
                    ordered: false,
                    content: vec![strong("Breathe"), text(" deeply")]
                },
                Block::ListItem {
                    ordered: true,
                    content: vec![text("Walk "), Inline::Emphasis("daily".to_string())]
                },
                Block::Paragraph(vec![text("Keep going!")]),
            ]
        );
    }
}
