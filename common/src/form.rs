//! Client-side validation and value collection for dynamic forms.

use std::collections::BTreeMap;

use regex::Regex;

use crate::locale::Locale;
use crate::model::FieldValues;
use crate::model::field::{Field, FieldType};

/// Value stored for a ticked checkbox.
pub const CHECKED: &str = "true";

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Required,
    TooShort(usize),
    TooLong(usize),
    Pattern,
    UnknownOption,
}

/// Field-local failures, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, (FieldError, Option<(String, String)>)>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldError> {
        self.errors.get(field_id).map(|(error, _)| error)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Message for `field_id` in `locale`; the field's custom message wins
    /// over the generic one.
    pub fn message(&self, field_id: &str, locale: Locale) -> Option<String> {
        let (error, custom) = self.errors.get(field_id)?;
        if let Some((fr, ar)) = custom {
            let text = locale.pick(fr, ar);
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }
        Some(error.message(locale))
    }

    fn insert(&mut self, field: &Field, error: FieldError) {
        let custom = field.validation.as_ref().and_then(|v| match error {
            FieldError::Required => None,
            _ => v.message.clone().map(|fr| (fr, v.message_ar.clone().unwrap_or_default())),
        });
        self.errors.insert(field.id.clone(), (error, custom));
    }
}

impl FieldError {
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (FieldError::Required, Locale::Fr) => "Ce champ est obligatoire".to_string(),
            (FieldError::Required, Locale::Ar) => "هذا الحقل مطلوب".to_string(),
            (FieldError::TooShort(n), Locale::Fr) => format!("Minimum {n} caractères"),
            (FieldError::TooShort(n), Locale::Ar) => format!("الحد الأدنى {n} أحرف"),
            (FieldError::TooLong(n), Locale::Fr) => format!("Maximum {n} caractères"),
            (FieldError::TooLong(n), Locale::Ar) => format!("الحد الأقصى {n} أحرف"),
            (FieldError::Pattern, Locale::Fr) => "Format invalide".to_string(),
            (FieldError::Pattern, Locale::Ar) => "تنسيق غير صالح".to_string(),
            (FieldError::UnknownOption, Locale::Fr) => "Choix invalide".to_string(),
            (FieldError::UnknownOption, Locale::Ar) => "اختيار غير صالح".to_string(),
        }
    }
}

/// Checks `values` against the declared `fields`.
///
/// Empty optional fields skip every other rule. A pattern passes when it
/// matches anywhere in the value; a pattern that does not compile rejects
/// the value, which is why [`invalid_pattern`] guards template saves.
pub fn validate(fields: &[Field], values: &FieldValues) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for field in fields {
        if let Some(error) = check_field(field, values.get(&field.id).map(String::as_str)) {
            errors.insert(field, error);
        }
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn check_field(field: &Field, value: Option<&str>) -> Option<FieldError> {
    let value = value.unwrap_or("").trim();

    if field.field_type == FieldType::Checkbox {
        return (field.required && value != CHECKED).then_some(FieldError::Required);
    }
    if value.is_empty() {
        return field.required.then_some(FieldError::Required);
    }
    if field.field_type.has_options() && !field.options.iter().any(|o| o.value == value) {
        return Some(FieldError::UnknownOption);
    }

    let rules = field.validation.as_ref()?;
    let length = value.chars().count();
    if let Some(min) = rules.min.filter(|min| length < *min) {
        return Some(FieldError::TooShort(min));
    }
    if let Some(max) = rules.max.filter(|max| length > *max) {
        return Some(FieldError::TooLong(max));
    }
    if let Some(pattern) = rules.pattern.as_deref().filter(|p| !p.is_empty()) {
        let matches = Regex::new(pattern).is_ok_and(|re| re.is_match(value));
        if !matches {
            return Some(FieldError::Pattern);
        }
    }
    None
}

/// First field whose declared pattern does not compile, with the reason.
pub fn invalid_pattern(fields: &[Field]) -> Option<(&Field, regex::Error)> {
    fields.iter().find_map(|field| {
        let pattern = field.validation.as_ref()?.pattern.as_deref()?;
        if pattern.is_empty() {
            return None;
        }
        Regex::new(pattern).err().map(|e| (field, e))
    })
}

/// Values for the declared fields only; undeclared keys are dropped and
/// missing ones become empty strings.
pub fn collect_values(fields: &[Field], values: &FieldValues) -> FieldValues {
    fields
        .iter()
        .map(|field| {
            let value = values.get(&field.id).cloned().unwrap_or_default();
            (field.id.clone(), value)
        })
        .collect()
}

/// Starting values for a form: empty for every field, overlaid with
/// `prefilled` (for example a saved form being reopened).
pub fn initial_values(fields: &[Field], prefilled: Option<&FieldValues>) -> FieldValues {
    let empty = FieldValues::new();
    collect_values(fields, prefilled.unwrap_or(&empty))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::field::{FieldOption, FieldValidation};

    fn values(pairs: &[(&str, &str)]) -> FieldValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn required(id: &str) -> Field {
        let mut field = Field::text(id, id, id);
        field.required = true;
        field
    }

    fn choice(id: &str, kind: FieldType) -> Field {
        let mut field = Field::text(id, id, id);
        field.field_type = kind;
        field.options = ["cdi", "cdd"]
            .iter()
            .map(|v| FieldOption {
                value: v.to_string(),
                label: v.to_uppercase(),
                label_ar: v.to_string(),
            })
            .collect();
        field
    }

    #[test]
    fn required_fields_must_not_be_blank() {
        let fields = [required("name"), Field::text("note", "Note", "note")];
        let errors = validate(&fields, &values(&[("name", "   ")])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some(&FieldError::Required));
        assert_eq!(errors.message("name", Locale::Fr).unwrap(), "Ce champ est obligatoire");
        assert_eq!(errors.message("name", Locale::Ar).unwrap(), "هذا الحقل مطلوب");
    }

    #[test]
    fn empty_optional_field_skips_other_rules() {
        let mut field = Field::text("code", "Code", "code");
        field.validation = Some(FieldValidation {
            min: Some(3),
            pattern: Some("[0-9]+".to_string()),
            ..Default::default()
        });
        assert!(validate(&[field], &FieldValues::new()).is_ok());
    }

    #[test]
    fn length_bounds_count_characters() {
        let mut field = Field::text("name", "Nom", "الاسم");
        field.validation = Some(FieldValidation {
            min: Some(3),
            max: Some(5),
            ..Default::default()
        });
        let fields = [field];
        assert!(validate(&fields, &values(&[("name", "سمير")])).is_ok());
        let short = validate(&fields, &values(&[("name", "ab")])).unwrap_err();
        assert_eq!(short.get("name"), Some(&FieldError::TooShort(3)));
        let long = validate(&fields, &values(&[("name", "abcdef")])).unwrap_err();
        assert_eq!(long.message("name", Locale::Fr).unwrap(), "Maximum 5 caractères");
    }

    #[test]
    fn pattern_may_match_anywhere_in_value() {
        let mut field = Field::text("nin", "NIN", "رقم التعريف");
        field.validation = Some(FieldValidation {
            pattern: Some(r"\d{3}".to_string()),
            message: Some("NIN invalide".to_string()),
            message_ar: Some("رقم غير صالح".to_string()),
            ..Default::default()
        });
        let fields = [field];
        assert!(validate(&fields, &values(&[("nin", "NIN 123")])).is_ok());
        assert!(validate(&fields, &values(&[("nin", "123")])).is_ok());
        let errors = validate(&fields, &values(&[("nin", "NIN 12")])).unwrap_err();
        assert_eq!(errors.message("nin", Locale::Fr).unwrap(), "NIN invalide");
        assert_eq!(errors.message("nin", Locale::Ar).unwrap(), "رقم غير صالح");
    }

    #[test]
    fn anchors_in_pattern_are_honoured() {
        let mut field = Field::text("cin", "CIN", "رقم البطاقة");
        field.validation = Some(FieldValidation {
            pattern: Some("^[A-Z]{2}[0-9]{4}$".to_string()),
            ..Default::default()
        });
        let fields = [field];
        assert!(validate(&fields, &values(&[("cin", "AB1234")])).is_ok());
        let errors = validate(&fields, &values(&[("cin", "xAB1234")])).unwrap_err();
        assert_eq!(errors.get("cin"), Some(&FieldError::Pattern));
    }

    #[test]
    fn invalid_pattern_rejects_value() {
        let mut field = Field::text("x", "X", "x");
        field.validation = Some(FieldValidation {
            pattern: Some("(".to_string()),
            ..Default::default()
        });
        let errors = validate(&[field], &values(&[("x", "anything")])).unwrap_err();
        assert_eq!(errors.get("x"), Some(&FieldError::Pattern));
    }

    #[test]
    fn lookahead_patterns_are_reported_as_invalid() {
        let mut plain = Field::text("code", "Code", "code");
        plain.validation = Some(FieldValidation {
            pattern: Some(r"\d+".to_string()),
            ..Default::default()
        });
        let mut lookahead = Field::text("nin", "NIN", "nin");
        lookahead.validation = Some(FieldValidation {
            pattern: Some(r"^(?=.*\d).+$".to_string()),
            ..Default::default()
        });
        assert!(invalid_pattern(&[plain.clone(), Field::text("a", "A", "a")]).is_none());
        let fields = [plain, lookahead];
        let (field, _) = invalid_pattern(&fields).unwrap();
        assert_eq!(field.id, "nin");
    }

    #[test]
    fn choices_must_be_declared_options() {
        let fields = [choice("contract", FieldType::Select), choice("kind", FieldType::Radio)];
        assert!(validate(&fields, &values(&[("contract", "cdi"), ("kind", "cdd")])).is_ok());
        let errors = validate(&fields, &values(&[("contract", "freelance")])).unwrap_err();
        assert_eq!(errors.get("contract"), Some(&FieldError::UnknownOption));
        assert!(errors.get("kind").is_none());
    }

    #[test]
    fn required_checkbox_must_be_ticked() {
        let mut consent = required("consent");
        consent.field_type = FieldType::Checkbox;
        let fields = [consent];
        assert!(validate(&fields, &values(&[("consent", "false")])).is_err());
        assert!(validate(&fields, &values(&[("consent", CHECKED)])).is_ok());
    }

    #[test]
    fn collect_keeps_declared_fields_only() {
        let fields = [Field::text("a", "A", "a"), Field::text("b", "B", "b")];
        let collected = collect_values(&fields, &values(&[("a", "1"), ("zz", "ignored")]));
        assert_eq!(collected, values(&[("a", "1"), ("b", "")]));
    }

    #[test]
    fn initial_values_merge_prefilled() {
        let fields = [Field::text("a", "A", "a")];
        assert_eq!(initial_values(&fields, None), values(&[("a", "")]));
        let saved = values(&[("a", "kept")]);
        assert_eq!(initial_values(&fields, Some(&saved)), saved);
    }
}
