//! Reader for the document markup produced by [`crate::export`].
//!
//! The exporter writes one block element per line (`<h1>`..`<h3>`, `<p>`,
//! `<hr>`) inside a fixed frame of header, content and footer `<div>`s, so a
//! line-oriented scan is enough to turn it back into styled blocks for the
//! PDF layout. Header and footer keep their paragraphs only.
//!
//! Inline styling is limited to `<strong>` and `<em>`, possibly nested.

use std::sync::LazyLock;

use regex::Regex;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<h([1-3])\b[^>]*>(.*)</h[1-3]>$").expect("valid heading pattern"));
static PARAGRAPH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<p\b[^>]*>(.*)</p>$").expect("valid paragraph pattern"));
static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<title>(.*)</title>").expect("valid title pattern"));
static DIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^<html\b[^>]*\bdir="(rtl|ltr)""#).expect("valid dir pattern"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)(strong|em)\b[^>]*>").expect("valid inline tag pattern"));
static BR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("valid br pattern"));

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    /// One entry per visual line (`<br>` separated).
    Paragraph { lines: Vec<Vec<Span>> },
    Rule,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub title: String,
    pub rtl: bool,
    /// Centered lines above the content.
    pub header: Vec<Vec<Span>>,
    pub body: Vec<Block>,
    /// Centered lines below the content.
    pub footer: Vec<Vec<Span>>,
}

#[derive(Clone, Copy, PartialEq)]
enum Section {
    Header,
    Body,
    Footer,
}

/// Splits `html` into blocks. Lines that are not one of the known block
/// elements (frame tags, `<head>` content) are skipped.
pub fn parse(html: &str) -> Markup {
    let mut markup = Markup::default();
    let mut section = Section::Body;

    for raw in html.lines() {
        let line = raw.trim();

        if let Some(caps) = DIR_RE.captures(line) {
            markup.rtl = &caps[1] == "rtl";
        }
        if let Some(caps) = TITLE_RE.captures(line) {
            markup.title = unescape(&caps[1]);
        }
        if line.starts_with("<div class=\"document-header\"") {
            section = Section::Header;
            continue;
        }
        if line.starts_with("<div class=\"document-content\"") {
            section = Section::Body;
            continue;
        }
        if line.starts_with("<div class=\"document-footer\"") {
            section = Section::Footer;
            continue;
        }

        if section != Section::Body {
            if let Some(caps) = PARAGRAPH_RE.captures(line) {
                let lines = BR_RE.split(&caps[1]).map(parse_inline);
                match section {
                    Section::Header => markup.header.extend(lines),
                    _ => markup.footer.extend(lines),
                }
            }
            continue;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            let level = caps[1].parse().unwrap_or(3);
            let text = BR_RE.replace_all(&caps[2], " ");
            markup.body.push(Block::Heading {
                level,
                spans: parse_inline(&text),
            });
        } else if line.starts_with("<hr") {
            markup.body.push(Block::Rule);
        } else if let Some(caps) = PARAGRAPH_RE.captures(line) {
            let lines = BR_RE.split(&caps[1]).map(parse_inline).collect();
            markup.body.push(Block::Paragraph { lines });
        }
    }

    markup
}

/// Cuts a line at every `<strong>`/`<em>` boundary. Unbalanced closing tags
/// are ignored and unclosed opening tags style the rest of the line.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut last = 0;

    for caps in TAG_RE.captures_iter(text) {
        let Some(tag) = caps.get(0) else { continue };
        push_span(&mut spans, &text[last..tag.start()], bold > 0, italic > 0);
        last = tag.end();

        let depth = if &caps[2] == "strong" { &mut bold } else { &mut italic };
        if caps[1].is_empty() {
            *depth += 1;
        } else {
            *depth = depth.saturating_sub(1);
        }
    }
    push_span(&mut spans, &text[last..], bold > 0, italic > 0);

    spans
}

fn push_span(spans: &mut Vec<Span>, raw: &str, bold: bool, italic: bool) {
    if raw.is_empty() {
        return;
    }
    let text = unescape(raw);
    match spans.last_mut() {
        Some(prev) if prev.bold == bold && prev.italic == italic => prev.text.push_str(&text),
        _ => spans.push(Span { text, bold, italic }),
    }
}

/// Reverses `common::render::escape_html`.
pub fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
