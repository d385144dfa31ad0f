//! Formatting of assistant replies.
//!
//! Replies use a small Markdown-like subset: `**Heading**` lines (optionally
//! followed by `: body`), bullet or numbered list items, and `**strong**` /
//! `*strong*` inline runs. Everything else is a paragraph. [`format`] turns raw
//! text into [`FormattedBlock`]s and [`to_html`] serializes them.

use regex::Regex;
use std::sync::OnceLock;

/// One inline run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(String),
}

/// A sequence of inline runs. Adjacent plain runs are always merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RichText {
    pub spans: Vec<Inline>,
}

impl RichText {
    pub fn plain(text: &str) -> Self {
        let mut rich = Self::default();
        rich.push_text(text);
        rich
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Inline::Text(last)) = self.spans.last_mut() {
            last.push_str(text);
        } else {
            self.spans.push(Inline::Text(text.to_string()));
        }
    }

    fn push_strong(&mut self, text: &str) {
        self.spans.push(Inline::Strong(text.to_string()));
    }

    /// Text with all emphasis removed.
    pub fn plain_text(&self) -> String {
        self.spans
            .iter()
            .map(|span| match span {
                Inline::Text(t) | Inline::Strong(t) => t.as_str(),
            })
            .collect()
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for span in &self.spans {
            match span {
                Inline::Text(t) => html.push_str(&escape_html(t)),
                Inline::Strong(t) => {
                    html.push_str("<strong>");
                    html.push_str(&escape_html(t));
                    html.push_str("</strong>");
                }
            }
        }
        html
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormattedBlock {
    Heading {
        title: String,
        body: Option<RichText>,
    },
    Paragraph(RichText),
    List(Vec<RichText>),
}

impl FormattedBlock {
    pub fn to_html(&self) -> String {
        match self {
            FormattedBlock::Heading { title, body } => {
                let mut html = format!("<h3>{}</h3>", escape_html(title));
                if let Some(body) = body {
                    html.push_str(&format!("<p>{}</p>", body.to_html()));
                }
                html
            }
            FormattedBlock::Paragraph(text) => format!("<p>{}</p>", text.to_html()),
            FormattedBlock::List(items) => {
                let mut html = String::from("<ul>");
                for item in items {
                    html.push_str(&format!("<li>{}</li>", item.to_html()));
                }
                html.push_str("</ul>");
                html
            }
        }
    }
}

struct Patterns {
    line_breaks: Regex,
    spaces: Regex,
    stars: Regex,
    heading: Regex,
    list_item: Regex,
    strong_double: Regex,
    strong_single: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let compile = |p: &str| Regex::new(p).expect("formatter pattern is valid");
        Patterns {
            line_breaks: compile(r"\r\n?"),
            spaces: compile(r"[ \t]{2,}"),
            stars: compile(r"\*{3,}"),
            heading: compile(r"^\*\*([^*]+)\*\*\s*:?\s*(.*)$"),
            list_item: compile(r"^([*\-•]|[0-9]+[.)])\s+(.+)$"),
            strong_double: compile(r"\*\*([^*]+)\*\*"),
            strong_single: compile(r"\*([^*\s][^*]*[^*\s])\*"),
        }
    })
}

/// Unify line breaks, collapse horizontal whitespace runs, and cap `*` runs at two.
pub fn normalize(raw: &str) -> String {
    let p = patterns();
    let text = p.line_breaks.replace_all(raw, "\n");
    let text = p.spaces.replace_all(&text, " ");
    p.stars.replace_all(&text, "**").into_owned()
}

/// Apply the two emphasis passes. The single-marker pass only sees text the
/// double-marker pass left plain, so spans never nest.
pub fn format_inline(text: &str) -> RichText {
    let p = patterns();
    let mut rich = RichText::default();
    let mut last = 0;

    for caps in p.strong_double.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_single_pass(&text[last..whole.start()], &mut rich);
        rich.push_strong(inner.as_str());
        last = whole.end();
    }
    push_single_pass(&text[last..], &mut rich);

    rich
}

fn push_single_pass(text: &str, rich: &mut RichText) {
    let p = patterns();
    let mut last = 0;

    for caps in p.strong_single.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        rich.push_text(&text[last..whole.start()]);
        rich.push_strong(inner.as_str());
        last = whole.end();
    }
    rich.push_text(&text[last..]);
}

/// Convert raw reply text into blocks. Never fails; blank input yields no blocks.
pub fn format(raw: &str) -> Vec<FormattedBlock> {
    let p = patterns();
    let normalized = normalize(raw);

    let mut blocks = Vec::new();
    let mut list_items: Vec<RichText> = Vec::new();

    for line in normalized.split('\n') {
        let line = line.trim();

        if line.is_empty() {
            flush_list(&mut list_items, &mut blocks);
            continue;
        }

        if let Some(caps) = p.heading.captures(line) {
            flush_list(&mut list_items, &mut blocks);
            let title = caps.get(1).map_or("", |m| m.as_str()).to_string();
            let body = caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|b| !b.is_empty())
                .map(format_inline);
            blocks.push(FormattedBlock::Heading { title, body });
            continue;
        }

        if let Some(item) = p.list_item.captures(line).and_then(|caps| caps.get(2)) {
            list_items.push(format_inline(item.as_str()));
            continue;
        }

        flush_list(&mut list_items, &mut blocks);
        blocks.push(FormattedBlock::Paragraph(format_inline(line)));
    }

    flush_list(&mut list_items, &mut blocks);
    blocks
}

fn flush_list(items: &mut Vec<RichText>, blocks: &mut Vec<FormattedBlock>) {
    if !items.is_empty() {
        blocks.push(FormattedBlock::List(std::mem::take(items)));
    }
}

pub fn to_html(blocks: &[FormattedBlock]) -> String {
    blocks.iter().map(FormattedBlock::to_html).collect()
}

pub fn format_html(raw: &str) -> String {
    to_html(&format(raw))
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
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

    fn rich(spans: Vec<Inline>) -> RichText {
        RichText { spans }
    }

    #[test]
    fn test_empty_and_whitespace_input_yield_no_blocks() {
        assert_eq!(format(""), vec![]);
        assert_eq!(format("   "), vec![]);
        assert_eq!(format("\n\r\n \t \n"), vec![]);
        assert_eq!(format_html("  \n "), "");
    }

    #[test]
    fn test_heading_without_body() {
        assert_eq!(
            format("**Title**"),
            vec![FormattedBlock::Heading { title: "Title".to_string(), body: None }]
        );
    }

    #[test]
    fn test_heading_with_colon_and_body() {
        assert_eq!(
            format("**Title**: body text"),
            vec![FormattedBlock::Heading {
                title: "Title".to_string(),
                body: Some(RichText::plain("body text")),
            }]
        );
        assert_eq!(format_html("**Title**: body text"), "<h3>Title</h3><p>body text</p>");
    }

    #[test]
    fn test_consecutive_markers_form_one_list() {
        assert_eq!(
            format("* a\n* b\n- c"),
            vec![FormattedBlock::List(vec![
                RichText::plain("a"),
                RichText::plain("b"),
                RichText::plain("c"),
            ])]
        );
    }

    #[test]
    fn test_numbered_and_bullet_markers() {
        assert_eq!(
            format_html("1. one\n2) two\n• three"),
            "<ul><li>one</li><li>two</li><li>three</li></ul>"
        );
    }

    #[test]
    fn test_blank_line_splits_lists() {
        assert_eq!(
            format("* a\n\n* b"),
            vec![
                FormattedBlock::List(vec![RichText::plain("a")]),
                FormattedBlock::List(vec![RichText::plain("b")]),
            ]
        );
    }

    #[test]
    fn test_paragraph_and_heading_close_open_list() {
        assert_eq!(
            format_html("- a\nafter\n- b\n**Next**"),
            "<ul><li>a</li></ul><p>after</p><ul><li>b</li></ul><h3>Next</h3>"
        );
    }

    #[test]
    fn test_odd_emphasis_line_is_heading_with_strong_body() {
        assert_eq!(
            format("**a**b**c**"),
            vec![FormattedBlock::Heading {
                title: "a".to_string(),
                body: Some(rich(vec![text("b"), strong("c")])),
            }]
        );
    }

    #[test]
    fn test_triple_stars_collapse_before_matching() {
        assert_eq!(
            format("This is ***very*** important"),
            vec![FormattedBlock::Paragraph(rich(vec![
                text("This is "),
                strong("very"),
                text(" important"),
            ]))]
        );
        assert_eq!(normalize("a ****** b"), "a ** b");
    }

    #[test]
    fn test_single_emphasis_not_adjacent_to_whitespace() {
        assert_eq!(
            format_inline("an *emph* word"),
            rich(vec![text("an "), strong("emph"), text(" word")])
        );
        assert_eq!(format_inline("a * b * c"), RichText::plain("a * b * c"));
        assert_eq!(format_inline("2 *x"), RichText::plain("2 *x"));
    }

    #[test]
    fn test_list_items_get_inline_emphasis() {
        assert_eq!(
            format("- **bold** item"),
            vec![FormattedBlock::List(vec![rich(vec![strong("bold"), text(" item")])])]
        );
    }

    #[test]
    fn test_line_breaks_and_spaces_normalized() {
        assert_eq!(
            format("first   line\r\nsecond\rthird"),
            vec![
                FormattedBlock::Paragraph(RichText::plain("first line")),
                FormattedBlock::Paragraph(RichText::plain("second")),
                FormattedBlock::Paragraph(RichText::plain("third")),
            ]
        );
    }

    #[test]
    fn test_marker_without_content_is_paragraph() {
        assert_eq!(format_html("*\n-"), "<p>*</p><p>-</p>");
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            format_html("<script>alert('x')</script> & **<b>**"),
            "<p>&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong></p>"
        );
    }

    #[test]
    fn test_plain_text_strips_emphasis() {
        assert_eq!(format_inline("a **b** *cd*").plain_text(), "a b cd");
    }
}
