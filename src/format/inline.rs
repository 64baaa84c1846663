use std::sync::LazyLock;

use regex::Regex;

use super::Inline;

static STRONG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static EMPHASIS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// Split `text` on `re`, wrapping each captured span with `wrap`. Empty
/// spans and empty text runs are dropped.
fn split_spans(text: &str, re: &Regex, wrap: fn(String) -> Inline) -> Vec<Inline> {
    let mut out = Vec::new();
    let mut last = 0;
    for caps in re.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(Inline::Text(text[last..whole.start()].to_string()));
        }
        if !inner.as_str().is_empty() {
            out.push(wrap(inner.as_str().to_string()));
        }
        last = whole.end();
    }
    if last < text.len() {
        out.push(Inline::Text(text[last..].to_string()));
    }
    out
}

/// `**x**` spans become [`Inline::Strong`]; everything else is text.
pub fn parse_strong(text: &str) -> Vec<Inline> {
    split_spans(text, &STRONG, Inline::Strong)
}

/// Strong spans first, then `*x*` emphasis inside the remaining text.
pub fn parse_inline(text: &str) -> Vec<Inline> {
    parse_strong(text)
        .into_iter()
        .flat_map(|span| match span {
            Inline::Text(t) => split_spans(&t, &EMPHASIS, Inline::Emphasis),
            other => vec![other],
        })
        .collect()
}
