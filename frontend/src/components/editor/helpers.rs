//! Text helpers for the template editor.
//!
//! Browser textarea selections (`selectionStart`, `selectionEnd`) are counted
//! in UTF-16 code units while Rust strings are indexed by UTF-8 bytes; Arabic
//! bodies make the difference visible, so every selection goes through the
//! conversions below before slicing.

use common::model::field::FieldOption;

/// Word selected after a formatting snippet is inserted.
const SAMPLE: &str = "texte";

/// Formatting actions of the editor toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Heading,
    Bold,
    Italic,
    BulletList,
    Rule,
    /// Inserts a `/champ` placeholder token.
    Field,
}

impl Style {
    /// Snippet inserted for the style, and the byte range to select inside it.
    fn snippet(&self) -> (&'static str, usize, usize) {
        match self {
            Style::Heading => ("## texte", 3, 3 + SAMPLE.len()),
            Style::Bold => ("**texte**", 2, 2 + SAMPLE.len()),
            Style::Italic => ("*texte*", 1, 1 + SAMPLE.len()),
            Style::BulletList => ("- texte", 2, 2 + SAMPLE.len()),
            Style::Rule => ("\n---\n", 5, 5),
            Style::Field => ("/champ", 1, 6),
        }
    }
}

/// Replaces `text[start..end]` with the snippet of `style`. Returns the new
/// text and the byte range to select.
pub fn apply_style(text: &str, start: usize, end: usize, style: Style) -> (String, usize, usize) {
    let start = start.min(text.len());
    let end = end.clamp(start, text.len());
    let (snippet, from, to) = style.snippet();
    let updated = format!("{}{}{}", &text[..start], snippet, &text[end..]);
    (updated, start + from, start + to)
}

pub fn byte_to_utf16_idx(s: &str, byte_idx: usize) -> u32 {
    s[..byte_idx.min(s.len())].encode_utf16().count() as u32
}

pub fn utf16_to_byte_idx(s: &str, utf16_idx: usize) -> usize {
    let mut units = 0;
    for (byte_idx, c) in s.char_indices() {
        if units >= utf16_idx {
            return byte_idx;
        }
        units += c.len_utf16();
    }
    s.len()
}

/// MD5 hex digest, used to tell whether the editor holds unsaved changes.
pub fn compute_md5(input: &str) -> String {
    format!("{:x}", md5::compute(input))
}

/// Parses one option per line, `value | label | label_ar`. Missing labels
/// fall back to the value; blank lines are skipped.
pub fn parse_options(text: &str) -> Vec<FieldOption> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut parts = line.split('|').map(str::trim);
            let value = parts.next().unwrap_or_default().to_string();
            let label = parts.next().filter(|s| !s.is_empty()).unwrap_or(&value).to_string();
            let label_ar = parts.next().filter(|s| !s.is_empty()).unwrap_or(&label).to_string();
            FieldOption { value, label, label_ar }
        })
        .collect()
}

pub fn format_options(options: &[FieldOption]) -> String {
    options
        .iter()
        .map(|o| format!("{} | {} | {}", o.value, o.label, o.label_ar))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_wraps_the_selection_and_selects_the_sample() {
        let (text, start, end) = apply_style("Objet : demande", 8, 15, Style::Bold);
        assert_eq!(text, "Objet : **texte**");
        assert_eq!(&text[start..end], "texte");
    }

    #[test]
    fn field_snippet_selects_the_token_name() {
        let (text, start, end) = apply_style("Nom : ", 6, 6, Style::Field);
        assert_eq!(text, "Nom : /champ");
        assert_eq!(&text[start..end], "champ");
    }

    #[test]
    fn out_of_range_selection_is_clamped() {
        let (text, _, _) = apply_style("abc", 10, 2, Style::Italic);
        assert_eq!(text, "abc*texte*");
    }

    #[test]
    fn utf16_indices_round_trip_over_arabic_text() {
        let text = "الاسم: /name";
        let byte_idx = text.find('/').unwrap();
        let utf16_idx = byte_to_utf16_idx(text, byte_idx);
        assert_eq!(utf16_idx, 7);
        assert_eq!(utf16_to_byte_idx(text, utf16_idx as usize), byte_idx);
        assert_eq!(utf16_to_byte_idx(text, 500), text.len());
    }

    #[test]
    fn options_parse_with_label_fallbacks() {
        let options = parse_options("m | Masculin | ذكر\n\nf | Féminin\nautre");
        assert_eq!(options.len(), 3);
        assert_eq!(options[0].label_ar, "ذكر");
        assert_eq!(options[1].label_ar, "Féminin");
        assert_eq!(options[2].label, "autre");
        assert_eq!(parse_options(&format_options(&options)), options);
    }
}
