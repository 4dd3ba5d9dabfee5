use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// History entry written when an identified user exports a document.
///
/// Only this denormalized record is stored; the submitted values are not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub id: String,
    pub user_id: String,
    pub template_id: String,
    /// Document kind, e.g. `"pdf"`.
    pub kind: String,
    pub title: String,
    pub generated_at: DateTime<Utc>,
    pub download_count: i64,
}
