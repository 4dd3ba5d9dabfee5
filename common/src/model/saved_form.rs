use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::FieldValues;

/// A submission kept under a name so the owner can resume it later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedForm {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    pub title: String,
    pub values: FieldValues,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
