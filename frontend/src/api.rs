//! Typed client for the backend HTTP API.
//!
//! Every request carries the current locale in `X-Locale`. Admin calls add the
//! credentials accepted at login as Basic authorization. Identity headers are
//! added by the authenticating proxy, not here.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use common::locale::Locale;
use common::model::category::{Category, CategoryInput};
use common::model::document::GeneratedDocument;
use common::model::profile::{UserProfile, UserStats};
use common::model::saved_form::SavedForm;
use common::model::template::{Template, TemplateInput};
use common::requests::{
    AdminAuthResponse, AdminCredentials, ErrorBody, ExportRequest, PreferencesUpdate, SaveFormRequest,
    SessionResponse, DOCUMENT_ID_HEADER,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(#[from] gloo_net::Error),

    #[error("{message} ({status})")]
    Status { status: u16, message: String },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Network(_) => None,
        }
    }
}

/// PDF bytes returned by an export, with the server-chosen filename.
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
    /// History entry id, present for identified users.
    pub document_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Api {
    locale: Locale,
    admin: Option<AdminCredentials>,
}

impl Api {
    pub fn new(locale: Locale, admin: Option<AdminCredentials>) -> Self {
        Self { locale, admin }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = RequestBuilder::new(path)
            .method(method)
            .header("X-Locale", self.locale.code());
        match &self.admin {
            Some(admin) if path.starts_with("/api/admin/") => {
                let token = BASE64.encode(format!("{}:{}", admin.email, admin.password));
                builder.header("Authorization", &format!("Basic {token}"))
            }
            _ => builder,
        }
    }

    async fn send(&self, method: Method, path: &str) -> Result<Response, ApiError> {
        let response = self.request(method, path).send().await?;
        check(response).await
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Response, ApiError> {
        let response = self.request(method, path).json(body)?.send().await?;
        check(response).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Ok(self.send(Method::GET, path).await?.json().await?)
    }

    pub async fn session(&self) -> Result<SessionResponse, ApiError> {
        self.get("/api/session").await
    }

    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/api/categories").await
    }

    pub async fn templates(&self, category: Option<&str>) -> Result<Vec<Template>, ApiError> {
        match category {
            Some(id) => self.get(&format!("/api/templates?category={id}")).await,
            None => self.get("/api/templates").await,
        }
    }

    pub async fn template(&self, id: &str) -> Result<Template, ApiError> {
        self.get(&format!("/api/templates/{id}")).await
    }

    pub async fn saved_forms(&self) -> Result<Vec<SavedForm>, ApiError> {
        self.get("/api/saved-forms").await
    }

    pub async fn save_form(&self, id: Option<&str>, request: &SaveFormRequest) -> Result<SavedForm, ApiError> {
        let response = match id {
            Some(id) => self.send_json(Method::PUT, &format!("/api/saved-forms/{id}"), request).await?,
            None => self.send_json(Method::POST, "/api/saved-forms", request).await?,
        };
        Ok(response.json().await?)
    }

    pub async fn delete_saved_form(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/api/saved-forms/{id}")).await?;
        Ok(())
    }

    pub async fn export(&self, template_id: &str, request: &ExportRequest) -> Result<ExportedPdf, ApiError> {
        let response = self
            .send_json(Method::POST, &format!("/api/documents/export/{template_id}"), request)
            .await?;
        let filename = response
            .headers()
            .get("content-disposition")
            .and_then(|value| attachment_filename(&value))
            .unwrap_or_else(|| format!("{template_id}.pdf"));
        let document_id = response.headers().get(DOCUMENT_ID_HEADER);
        let bytes = response.binary().await?;
        Ok(ExportedPdf {
            filename,
            bytes,
            document_id,
        })
    }

    pub async fn history(&self) -> Result<Vec<GeneratedDocument>, ApiError> {
        self.get("/api/documents").await
    }

    pub async fn count_download(&self, document_id: &str) -> Result<GeneratedDocument, ApiError> {
        Ok(self
            .send(Method::POST, &format!("/api/documents/{document_id}/download"))
            .await?
            .json()
            .await?)
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.get("/api/profile").await
    }

    pub async fn update_preferences(&self, update: &PreferencesUpdate) -> Result<UserProfile, ApiError> {
        Ok(self
            .send_json(Method::PUT, "/api/profile/preferences", update)
            .await?
            .json()
            .await?)
    }

    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        self.get("/api/profile/stats").await
    }

    /// `Ok(false)` when the pair is rejected.
    pub async fn admin_login(&self, credentials: &AdminCredentials) -> Result<bool, ApiError> {
        let response = self
            .request(Method::POST, "/api/admin/auth")
            .json(credentials)?
            .send()
            .await?;
        if response.status() == 401 {
            return Ok(false);
        }
        let body: AdminAuthResponse = check(response).await?.json().await?;
        Ok(body.success)
    }

    pub async fn admin_categories(&self) -> Result<Vec<Category>, ApiError> {
        self.get("/api/admin/categories").await
    }

    pub async fn save_category(&self, id: Option<&str>, input: &CategoryInput) -> Result<Category, ApiError> {
        let response = match id {
            Some(id) => self.send_json(Method::PUT, &format!("/api/admin/categories/{id}"), input).await?,
            None => self.send_json(Method::POST, "/api/admin/categories", input).await?,
        };
        Ok(response.json().await?)
    }

    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/api/admin/categories/{id}")).await?;
        Ok(())
    }

    pub async fn admin_templates(&self) -> Result<Vec<Template>, ApiError> {
        self.get("/api/admin/templates").await
    }

    pub async fn save_template(&self, id: Option<&str>, input: &TemplateInput) -> Result<Template, ApiError> {
        let response = match id {
            Some(id) => self.send_json(Method::PUT, &format!("/api/admin/templates/{id}"), input).await?,
            None => self.send_json(Method::POST, "/api/admin/templates", input).await?,
        };
        Ok(response.json().await?)
    }

    pub async fn delete_template(&self, id: &str) -> Result<(), ApiError> {
        self.send(Method::DELETE, &format!("/api/admin/templates/{id}")).await?;
        Ok(())
    }
}

async fn check(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => response.status_text(),
    };
    Err(ApiError::Status { status, message })
}

/// `filename` parameter of a `Content-Disposition: attachment` header.
fn attachment_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::attachment_filename;

    #[test]
    fn reads_quoted_and_bare_filenames() {
        assert_eq!(
            attachment_filename("attachment; filename=\"tpl-1700000000000.pdf\"").as_deref(),
            Some("tpl-1700000000000.pdf")
        );
        assert_eq!(attachment_filename("attachment; filename=a.pdf").as_deref(), Some("a.pdf"));
        assert_eq!(attachment_filename("attachment"), None);
    }
}
