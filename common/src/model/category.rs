use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// Grouping label applied to templates for navigation and filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub description: String,
    pub description_ar: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin payload for creating or replacing a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ar: String,
    #[serde(default = "default_order")]
    pub order: i64,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_order() -> i64 {
    1
}

fn default_active() -> bool {
    true
}

impl Category {
    pub fn name_in(&self, locale: Locale) -> &str {
        locale.pick(&self.name, &self.name_ar)
    }

    pub fn description_in(&self, locale: Locale) -> &str {
        locale.pick(&self.description, &self.description_ar)
    }
}

impl CategoryInput {
    pub fn new(
        name: &str,
        name_ar: &str,
        description: &str,
        description_ar: &str,
        order: i64,
    ) -> Self {
        CategoryInput {
            name: name.to_string(),
            name_ar: name_ar.to_string(),
            description: description.to_string(),
            description_ar: description_ar.to_string(),
            order,
            is_active: true,
        }
    }
}

impl From<&Category> for CategoryInput {
    fn from(category: &Category) -> Self {
        CategoryInput {
            name: category.name.clone(),
            name_ar: category.name_ar.clone(),
            description: category.description.clone(),
            description_ar: category.description_ar.clone(),
            order: category.order,
            is_active: category.is_active,
        }
    }
}

/// The nine categories a fresh store is seeded with.
pub fn default_categories() -> Vec<CategoryInput> {
    vec![
        CategoryInput::new(
            "Travail / Emploi",
            "العمل / التوظيف",
            "Documents liés au travail et à l'emploi",
            "الوثائق المتعلقة بالعمل والتوظيف",
            1,
        ),
        CategoryInput::new(
            "Éducation",
            "التعليم",
            "Documents scolaires et universitaires",
            "الوثائق المدرسية والجامعية",
            2,
        ),
        CategoryInput::new(
            "Finance / Paiement",
            "المالية / الدفع",
            "Documents financiers et de paiement",
            "الوثائق المالية والدفع",
            3,
        ),
        CategoryInput::new(
            "Logement",
            "السكن",
            "Documents de logement et résidence",
            "وثائق السكن والإقامة",
            4,
        ),
        CategoryInput::new(
            "Famille / État civil",
            "الأسرة / الحالة المدنية",
            "Documents d'état civil et familiaux",
            "وثائق الحالة المدنية والأسرة",
            5,
        ),
        CategoryInput::new(
            "Justice / Légalisation",
            "العدالة / التوثيق",
            "Documents juridiques et légalisations",
            "الوثائق القانونية والتوثيق",
            6,
        ),
        CategoryInput::new(
            "Transport / Déplacement",
            "النقل / التنقل",
            "Documents de transport et déplacement",
            "وثائق النقل والتنقل",
            7,
        ),
        CategoryInput::new(
            "Santé",
            "الصحة",
            "Documents médicaux et de santé",
            "الوثائق الطبية والصحية",
            8,
        ),
        CategoryInput::new(
            "Autres",
            "أخرى",
            "Autres documents administratifs",
            "وثائق إدارية أخرى",
            9,
        ),
    ]
}
