//! Placeholder substitution and the minimal Markdown→HTML conversion used
//! for exported documents.
//!
//! Tokens are first swapped for opaque markers ([`mark_placeholders`]) so any
//! Markdown converter can run over the body without mangling them; the markers
//! are then filled with either a blank input block (editor preview) or the
//! submitted value (final document). Every occurrence of a token is replaced.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::fields::{primary_label, scan_tokens, secondary_label};
use crate::locale::Locale;
use crate::model::FieldValues;
use crate::model::field::Field;

/// Rendered in place of a value that was not filled in.
pub const BLANK: &str = "____________________";

const MARKER_OPEN: char = '\u{E000}';
const MARKER_CLOSE: char = '\u{E001}';

static MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}(\d+)\x{E001}").expect("valid marker pattern"));
static BOLD_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid bold-italic pattern"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid bold pattern"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+?)\*").expect("valid italic pattern"));

const H1_STYLE: &str = "font-size:24px;font-weight:bold;margin:0 0 16px;";
const H2_STYLE: &str = "font-size:20px;font-weight:bold;margin:0 0 12px;";
const H3_STYLE: &str = "font-size:16px;font-weight:bold;margin:0 0 8px;";
const P_STYLE: &str = "margin:0 0 12px;line-height:1.6;";
const HR: &str = r#"<hr style="border:none;border-top:1px solid #000;margin:20px 0;">"#;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    /// The template has no Markdown body to render.
    #[error("template has no markdown body")]
    MissingBody,
}

/// A body whose tokens were replaced by markers, plus the token name behind
/// each marker index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    text: String,
    names: Vec<String>,
}

impl Placeholders {
    /// The marked body, safe to hand to a Markdown converter.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Distinct token names in first-occurrence order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Replaces every marker left in `rendered` with `replacement(token_name)`.
    pub fn fill(&self, rendered: &str, mut replacement: impl FnMut(&str) -> String) -> String {
        MARKER_RE
            .replace_all(rendered, |caps: &Captures| {
                match caps[1].parse::<usize>().ok().and_then(|i| self.names.get(i)) {
                    Some(name) => replacement(name),
                    None => String::new(),
                }
            })
            .into_owned()
    }
}

/// Swaps each token for a marker; all occurrences of one token share a marker.
pub fn mark_placeholders(markdown: &str) -> Placeholders {
    let mut names: Vec<String> = Vec::new();
    let mut text = String::with_capacity(markdown.len());
    let mut last = 0;

    for token in scan_tokens(markdown) {
        let index = match names.iter().position(|n| n == token.name) {
            Some(index) => index,
            None => {
                names.push(token.name.to_string());
                names.len() - 1
            }
        };
        text.push_str(&markdown[last..token.range.start]);
        text.push(MARKER_OPEN);
        text.push_str(&index.to_string());
        text.push(MARKER_CLOSE);
        last = token.range.end;
    }
    text.push_str(&markdown[last..]);

    Placeholders { text, names }
}

/// Two-line block standing for an unfilled input: the bold label, then a
/// blank line to write on.
pub fn preview_block(label: &str) -> String {
    format!(
        "<div class=\"field-placeholder\"><strong class=\"field-label\">{}:</strong>\n<div class=\"field-input\">{}</div></div>",
        escape_html(label),
        BLANK
    )
}

/// Editor preview: tokens become [`preview_block`]s labelled from `fields`
/// (or from the token itself when no field matches).
///
/// `convert` turns the marked Markdown into HTML; the editor passes its
/// Markdown library here.
pub fn render_preview(
    markdown: &str,
    fields: &[Field],
    locale: Locale,
    convert: impl FnOnce(&str) -> String,
) -> String {
    let marked = mark_placeholders(markdown);
    let html = convert(marked.text());
    marked.fill(&html, |name| {
        let label = match fields.iter().find(|f| f.id == name) {
            Some(field) => locale.pick(&field.label, &field.label_ar).to_string(),
            None => match locale {
                Locale::Fr => primary_label(name),
                Locale::Ar => secondary_label(name),
            },
        };
        preview_block(&label)
    })
}

/// Final document: tokens become the HTML-escaped submitted value, or
/// [`BLANK`] when the value is missing or empty.
pub fn render_final(
    markdown: &str,
    values: &FieldValues,
    convert: impl FnOnce(&str) -> String,
) -> String {
    let marked = mark_placeholders(markdown);
    let html = convert(marked.text());
    marked.fill(&html, |name| filled_value(values, name))
}

fn filled_value(values: &FieldValues, name: &str) -> String {
    match values.get(name).map(|v| v.trim()) {
        Some(value) if !value.is_empty() => escape_html(value).replace('\n', "<br>"),
        _ => BLANK.to_string(),
    }
}

/// Export rendering: the template body converted with [`markdown_to_html`]
/// and filled with `values`.
///
/// Fails with [`RenderError::MissingBody`] when the body is absent or blank,
/// so no empty document is ever produced.
pub fn render_document(markdown: Option<&str>, values: &FieldValues) -> Result<String, RenderError> {
    let body = markdown
        .filter(|body| !body.trim().is_empty())
        .ok_or(RenderError::MissingBody)?;
    Ok(render_final(body, values, markdown_to_html))
}

/// Converts the Markdown subset used by templates into inline-styled HTML:
/// `#`/`##`/`###` headings, `***bold italic***`, `**bold**`, `*italic*`,
/// horizontal rules, and paragraphs separated by blank lines. Single line
/// breaks inside a paragraph are kept as `<br>`.
///
/// Output has one block element per line.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut blocks: Vec<String> = Vec::new();
    let mut paragraph: Vec<String> = Vec::new();

    for raw in markdown.lines() {
        let line = raw.trim();
        if line.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
        } else if is_rule(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(HR.to_string());
        } else if let Some((level, text)) = heading(line) {
            flush_paragraph(&mut blocks, &mut paragraph);
            let style = match level {
                1 => H1_STYLE,
                2 => H2_STYLE,
                _ => H3_STYLE,
            };
            blocks.push(format!("<h{level} style=\"{style}\">{}</h{level}>", inline(text)));
        } else {
            paragraph.push(inline(line));
        }
    }
    flush_paragraph(&mut blocks, &mut paragraph);

    blocks.join("\n")
}

fn flush_paragraph(blocks: &mut Vec<String>, paragraph: &mut Vec<String>) {
    if !paragraph.is_empty() {
        blocks.push(format!("<p style=\"{P_STYLE}\">{}</p>", paragraph.join("<br>")));
        paragraph.clear();
    }
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|c| *c == '#').count();
    if !(1..=3).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(' ') {
        return None;
    }
    Some((level, rest.trim()))
}

fn is_rule(line: &str) -> bool {
    let compact: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
    compact.len() >= 3
        && ['-', '*', '_']
            .iter()
            .any(|marker| compact.iter().all(|c| c == marker))
}

fn inline(text: &str) -> String {
    let escaped = escape_html(text);
    let text = BOLD_ITALIC_RE.replace_all(&escaped, "<strong><em>$1</em></strong>");
    let text = BOLD_RE.replace_all(&text, "<strong>$1</strong>");
    ITALIC_RE.replace_all(&text, "<em>$1</em>").into_owned()
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
