//! Rendering of formatted blocks for the terminal and for HTML.
//!
//! HTML output always escapes text; model output is never injected raw.

use std::fmt::Write;

use crossterm::style::{Stylize, style};

use crate::format::{Block, Inline};

/// ANSI-styled text for a terminal.
pub fn terminal(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut counter = 0usize;

    for block in blocks {
        if !matches!(block, Block::ListItem { ordered: true, .. }) {
            counter = 0;
        }
        match block {
            Block::Heading { level, content } => {
                let text = plain_inline(content);
                let styled = match level {
                    2 => style(&text).bold().underlined().magenta().to_string(),
                    3 => style(&text).bold().cyan().to_string(),
                    _ => style(&text).bold().to_string(),
                };
                let _ = writeln!(out, "{styled}");
            }
            Block::ListItem { ordered, content } => {
                let marker = if *ordered {
                    counter += 1;
                    format!("{counter}.")
                } else {
                    "•".to_string()
                };
                let _ = writeln!(out, "  {} {}", style(&marker).dim(), terminal_inline(content));
            }
            Block::Paragraph(content) => {
                let _ = writeln!(out, "{}", terminal_inline(content));
            }
            Block::Spacer => out.push('\n'),
        }
    }
    out
}

fn terminal_inline(content: &[Inline]) -> String {
    content
        .iter()
        .map(|span| match span {
            Inline::Text(t) => t.clone(),
            Inline::Strong(t) => style(t).bold().green().to_string(),
            Inline::Emphasis(t) => style(t).italic().to_string(),
        })
        .collect()
}

fn plain_inline(content: &[Inline]) -> String {
    content.iter().map(Inline::text).collect()
}

/// Escape text for inclusion in HTML element content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn html_inline(content: &[Inline]) -> String {
    content
        .iter()
        .map(|span| match span {
            Inline::Text(t) => escape_html(t),
            Inline::Strong(t) => format!("<strong>{}</strong>", escape_html(t)),
            Inline::Emphasis(t) => format!("<em>{}</em>", escape_html(t)),
        })
        .collect()
}

/// HTML fragment. Consecutive list items of the same kind share one list.
pub fn html(blocks: &[Block]) -> String {
    let mut out = String::new();
    let mut open_list: Option<bool> = None;

    for block in blocks {
        let item_kind = match block {
            Block::ListItem { ordered, .. } => Some(*ordered),
            _ => None,
        };
        if open_list.is_some() && open_list != item_kind {
            out.push_str(if open_list == Some(true) { "</ol>\n" } else { "</ul>\n" });
            open_list = None;
        }

        match block {
            Block::Heading { level, content } => {
                let _ = writeln!(out, "<h{level}>{}</h{level}>", html_inline(content));
            }
            Block::ListItem { ordered, content } => {
                if open_list.is_none() {
                    out.push_str(if *ordered { "<ol>\n" } else { "<ul>\n" });
                    open_list = Some(*ordered);
                }
                let _ = writeln!(out, "<li>{}</li>", html_inline(content));
            }
            Block::Paragraph(content) => {
                let _ = writeln!(out, "<p>{}</p>", html_inline(content));
            }
            Block::Spacer => out.push_str("<div class=\"spacer\"></div>\n"),
        }
    }

    if let Some(ordered) = open_list {
        out.push_str(if ordered { "</ol>\n" } else { "</ul>\n" });
    }
    out
}
