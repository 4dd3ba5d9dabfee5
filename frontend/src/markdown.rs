//! Markdown to HTML for in-browser previews, built on pulldown-cmark.
//!
//! Template bodies are written line by line, so single line breaks are kept
//! as `<br>` and runs of blank lines keep their height instead of collapsing
//! into one paragraph gap. This is the conversion handed to
//! `common::render::render_preview` and `render_final`.

use std::sync::LazyLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

static BR_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"BR_MARKER(\d+)").expect("valid marker pattern"));

pub fn to_html(markdown: &str) -> String {
    let text = normalize_text(markdown);
    let text = mark_blank_runs(&text);
    let parser = Parser::new_ext(&text, Options::ENABLE_STRIKETHROUGH).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    expand_br_markers(&output)
}

/// Converts CRLF and CR to LF and drops a leading BOM or zero-width space.
fn normalize_text(input: &str) -> String {
    input
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim_start_matches(['\u{feff}', '\u{200b}'])
        .to_string()
}

/// Replaces each run of two or more blank lines with a `BR_MARKER<n>`
/// paragraph, expanded after parsing.
fn mark_blank_runs(input: &str) -> String {
    let lines: Vec<&str> = input.lines().collect();
    let mut result = String::with_capacity(input.len());
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim().is_empty() {
            let mut count = 1;
            while i + count < lines.len() && lines[i + count].trim().is_empty() {
                count += 1;
            }
            if count > 1 {
                result.push_str(&format!("\nBR_MARKER{}\n\n", count - 1));
            } else {
                result.push('\n');
            }
            i += count;
        } else {
            result.push_str(lines[i]);
            result.push('\n');
            i += 1;
        }
    }
    result
}

fn expand_br_markers(input: &str) -> String {
    BR_MARKER_RE
        .replace_all(input, |caps: &regex::Captures| {
            let n = caps[1].parse::<usize>().unwrap_or(1);
            "<br>".repeat(n)
        })
        .into_owned()
}
