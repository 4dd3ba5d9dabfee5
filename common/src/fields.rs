//! Field extraction from Markdown template bodies.
//!
//! A template marks fillable slots with identifier-like tokens prefixed by a
//! slash: `**Nom:** /full_name`. The derived field list is a pure function of
//! the body, so it is recomputed on every edit instead of being edited
//! independently.
//!
//! Token rules:
//! - `/` then an ASCII letter or `_`, then ASCII letters, digits or `_`.
//! - Matching is greedy, so `/name_extra` is one token and never `/name`.
//! - A token glued to surrounding word characters is ignored: the `/` must not
//!   follow a letter, digit, `_` or another `/` (`and/or`, `https://x`), and
//!   the identifier must not run on into a non-ASCII letter (`/prénom`).

use std::collections::HashSet;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::model::field::Field;

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([A-Za-z_][A-Za-z0-9_]*)").expect("valid token pattern"));

/// One placeholder occurrence inside a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// Identifier without the leading slash.
    pub name: &'a str,
    /// Byte range of the whole token, slash included.
    pub range: Range<usize>,
}

/// Iterates over every placeholder occurrence, in document order.
pub fn scan_tokens(text: &str) -> impl Iterator<Item = Token<'_>> {
    TOKEN_RE.captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let name = caps.get(1)?;
        if glued_before(text, whole.start()) || glued_after(text, whole.end()) {
            return None;
        }
        Some(Token {
            name: name.as_str(),
            range: whole.range(),
        })
    })
}

fn glued_before(text: &str, start: usize) -> bool {
    text[..start]
        .chars()
        .next_back()
        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '/')
}

fn glued_after(text: &str, end: usize) -> bool {
    text[end..].chars().next().is_some_and(char::is_alphanumeric)
}

/// Distinct token names in first-occurrence order.
pub fn token_names(markdown: &str) -> Vec<&str> {
    let mut seen = HashSet::new();
    scan_tokens(markdown)
        .map(|token| token.name)
        .filter(|name| seen.insert(*name))
        .collect()
}

/// Derives the field list of a Markdown body: one optional text field per
/// distinct token, in first-occurrence order.
pub fn extract_fields(markdown: &str) -> Vec<Field> {
    token_names(markdown)
        .into_iter()
        .map(|name| Field::text(name, primary_label(name), secondary_label(name)))
        .collect()
}

/// Like [`extract_fields`], but a descriptor from `overrides` with a matching
/// id replaces the default one. Overrides for tokens no longer present in the
/// body are dropped, so the result still mirrors the body exactly.
pub fn derive_fields(markdown: &str, overrides: &[Field]) -> Vec<Field> {
    extract_fields(markdown)
        .into_iter()
        .map(|derived| match overrides.iter().find(|o| o.id == derived.id) {
            Some(custom) => merge_override(derived, custom),
            None => derived,
        })
        .collect()
}

fn merge_override(derived: Field, custom: &Field) -> Field {
    let mut field = custom.clone();
    field.id = derived.id;
    if field.label.trim().is_empty() {
        field.label = derived.label;
    }
    if field.label_ar.trim().is_empty() {
        field.label_ar = derived.label_ar;
    }
    if !field.field_type.has_options() {
        field.options.clear();
    }
    field
}

/// French label: underscores become spaces and each word is capitalised.
///
/// `employee_id` gives `Employee Id`.
pub fn primary_label(token: &str) -> String {
    token
        .replace('_', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Arabic label: underscores become spaces, casing is left alone.
///
/// `employee_id` gives `employee id`.
pub fn secondary_label(token: &str) -> String {
    token.replace('_', " ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::FieldType;

    fn ids(fields: &[Field]) -> Vec<&str> {
        fields.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn similar_tokens_are_not_conflated() {
        let fields = extract_fields("/full_name and /full_name2");
        assert_eq!(ids(&fields), vec!["full_name", "full_name2"]);
    }

    #[test]
    fn longer_token_does_not_register_its_prefix() {
        let fields = extract_fields("Nom: /name_extra");
        assert_eq!(ids(&fields), vec!["name_extra"]);
    }

    #[test]
    fn duplicates_collapse_in_first_occurrence_order() {
        let body = "/b then /a then /b again and /a, finally /c";
        assert_eq!(ids(&extract_fields(body)), vec!["b", "a", "c"]);
    }

    #[test]
    fn labels_are_derived_from_the_token() {
        assert_eq!(primary_label("employee_id"), "Employee Id");
        assert_eq!(secondary_label("employee_id"), "employee id");
        assert_eq!(primary_label("_private"), " Private");
        assert_eq!(primary_label("day2_start"), "Day2 Start");
    }

    #[test]
    fn derived_fields_default_to_optional_text() {
        let fields = extract_fields("**Date:** /signature_date");
        let field = &fields[0];
        assert_eq!(field.field_type, FieldType::Text);
        assert!(!field.required);
        assert!(field.placeholder.is_empty());
        assert!(field.placeholder_ar.is_empty());
        assert_eq!(field.label, "Signature Date");
        assert_eq!(field.label_ar, "signature date");
    }

    #[test]
    fn tokens_glued_to_words_are_ignored() {
        let body = "et/ou, km/h, https://example.org, /prénom, 12/2024";
        assert!(extract_fields(body).is_empty());
    }

    #[test]
    fn tokens_must_start_with_letter_or_underscore() {
        assert_eq!(ids(&extract_fields("/1st /_x /x1")), vec!["_x", "x1"]);
    }

    #[test]
    fn tokens_next_to_punctuation_and_markdown_match() {
        let body = "**Nom:** /nom.\n- (/ville)\n*/pays*";
        assert_eq!(ids(&extract_fields(body)), vec!["nom", "ville", "pays"]);
    }

    #[test]
    fn scan_reports_byte_ranges() {
        let body = "Date: /date";
        let tokens: Vec<_> = scan_tokens(body).collect();
        assert_eq!(tokens.len(), 1);
        assert_eq!(&body[tokens[0].range.clone()], "/date");
    }

    #[test]
    fn every_token_has_one_field_and_every_field_a_token() {
        let body = "# /title\n/a /b /a\n/c_d and /c_d_e";
        let fields = extract_fields(body);
        let names = token_names(body);
        assert_eq!(fields.len(), names.len());
        for field in &fields {
            assert!(scan_tokens(body).any(|t| t.name == field.id));
        }
    }

    #[test]
    fn overrides_apply_only_to_present_tokens() {
        let mut email = Field::text("contact_email", "", "");
        email.field_type = FieldType::Email;
        email.required = true;
        let stale = Field::text("removed", "Removed", "removed");

        let fields = derive_fields("/contact_email /phone", &[email, stale]);

        assert_eq!(ids(&fields), vec!["contact_email", "phone"]);
        assert_eq!(fields[0].field_type, FieldType::Email);
        assert!(fields[0].required);
        assert_eq!(fields[0].label, "Contact Email");
        assert_eq!(fields[1].field_type, FieldType::Text);
    }
}
