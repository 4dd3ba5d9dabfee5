use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;
use crate::model::field::Field;

/// A reusable document blueprint: metadata, a Markdown body and the field
/// list derived from that body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub category_id: String,
    pub order: i64,
    pub is_active: bool,
    #[serde(default)]
    pub estimated_time: String,
    /// Raw Markdown body; `None` for metadata-only templates, which cannot be exported.
    #[serde(default)]
    pub markdown_content: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin payload for creating or replacing a template.
///
/// `fields` carries per-field overrides (type, labels, options...) made in the
/// same edit; the stored list is always re-derived from `markdown_content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateInput {
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ar: String,
    pub category_id: String,
    #[serde(default = "default_order")]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub estimated_time: String,
    #[serde(default)]
    pub markdown_content: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

fn default_order() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

impl Template {
    pub fn name_in(&self, locale: Locale) -> &str {
        locale.pick(&self.name, &self.name_ar)
    }

    pub fn description_in(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_ar)
    }

    /// True when the template has a non-blank Markdown body.
    pub fn has_body(&self) -> bool {
        self.markdown_content
            .as_deref()
            .is_some_and(|body| !body.trim().is_empty())
    }
}

impl From<&Template> for TemplateInput {
    fn from(template: &Template) -> Self {
        TemplateInput {
            name: template.name.clone(),
            name_ar: template.name_ar.clone(),
            description: template.description.clone(),
            description_ar: template.description_ar.clone(),
            category_id: template.category_id.clone(),
            order: template.order,
            is_active: template.is_active,
            estimated_time: template.estimated_time.clone(),
            markdown_content: template.markdown_content.clone(),
            fields: template.fields.clone(),
        }
    }
}
