use serde::{Deserialize, Serialize};

/// One fillable slot of a template, identified by its placeholder token.
///
/// Fields are derived from the template's Markdown body (see
/// [`crate::fields::derive_fields`]); the stored list is recomputed on every
/// save, so a field has no identity beyond its token name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Token name, without the leading `/`.
    pub id: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    pub label: String,
    pub label_ar: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub placeholder_ar: String,
    #[serde(default)]
    pub required: bool,
    /// Choices for `select` and `radio` fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
}

/// Control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Tel,
    Date,
    Textarea,
    Select,
    Checkbox,
    Radio,
}

impl FieldType {
    /// All control kinds, in the order the admin editor lists them.
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Email,
        FieldType::Tel,
        FieldType::Date,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Checkbox,
        FieldType::Radio,
    ];

    /// Wire name, also used as the HTML `type` attribute for `<input>` kinds.
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Tel => "tel",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Checkbox => "checkbox",
            FieldType::Radio => "radio",
        }
    }

    pub fn parse(value: &str) -> Option<FieldType> {
        FieldType::ALL.into_iter().find(|t| t.as_str() == value)
    }

    /// Whether the field needs an option list to be usable.
    pub const fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOption {
    pub value: String,
    pub label: String,
    pub label_ar: String,
}

/// Optional constraints checked by [`crate::form::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    /// Minimum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<usize>,
    /// Maximum length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<usize>,
    /// Regular expression searched for in the value. Add `^`/`$` to
    /// require a whole-value match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_ar: Option<String>,
}

impl Field {
    /// A plain, optional text field with the given labels.
    pub fn text(id: impl Into<String>, label: impl Into<String>, label_ar: impl Into<String>) -> Self {
        Field {
            id: id.into(),
            field_type: FieldType::Text,
            label: label.into(),
            label_ar: label_ar.into(),
            placeholder: String::new(),
            placeholder_ar: String::new(),
            required: false,
            options: Vec::new(),
            validation: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_type_uses_lowercase_wire_names() {
        let json = serde_json::to_string(&FieldType::Textarea).unwrap();
        assert_eq!(json, "\"textarea\"");
        assert_eq!(FieldType::parse("radio"), Some(FieldType::Radio));
        assert_eq!(FieldType::parse("number"), None);
    }

    #[test]
    fn field_deserializes_with_defaults() {
        let field: Field =
            serde_json::from_str(r#"{"id":"city","label":"City","labelAr":"city"}"#).unwrap();
        assert_eq!(field.field_type, FieldType::Text);
        assert!(!field.required);
        assert!(field.options.is_empty());
        assert!(field.validation.is_none());
    }
}
