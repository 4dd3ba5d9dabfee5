use serde::{Deserialize, Serialize};

use crate::locale::{Locale, Theme};
use crate::model::FieldValues;
use crate::model::profile::Identity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Credential pair checked by the admin authentication endpoint.
pub struct AdminCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminAuthResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Payload of the export and render endpoints: submitted values plus the
/// locale the document frame is written in.
pub struct ExportRequest {
    pub values: FieldValues,
    #[serde(default)]
    pub locale: Option<Locale>,
    /// History title; defaults to the template name.
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveFormRequest {
    pub template_id: String,
    pub title: String,
    pub values: FieldValues,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// What the backend resolved from the current request.
pub struct SessionResponse {
    pub identity: Option<Identity>,
    pub locale: Locale,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    #[serde(default)]
    pub language: Option<Locale>,
    #[serde(default)]
    pub theme: Option<Theme>,
}

/// Response header carrying the id of the history entry written by an export.
pub const DOCUMENT_ID_HEADER: &str = "X-Document-Id";

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Body of every non-2xx JSON response.
pub struct ErrorBody {
    pub error: String,
    /// Id of the offending field, for errors tied to a single field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}
