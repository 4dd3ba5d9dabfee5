//! # Template Retrieval Service
//!
//! Backend logic for `GET /api/templates/{template_id}`.
//!
//! The template is loaded from the store in one query, with its `fields`
//! column decoded from JSON. Only active templates are visible here; the
//! admin listing returns inactive ones too.

use actix_web::{web, HttpResponse};

use crate::error::ServiceError;
use crate::store::Store;

/// Actix web handler for the `GET /api/templates/{template_id}` endpoint.
///
/// # Returns
/// - `200 OK` with the `Template` as JSON.
/// - `404 Not Found` when the id is unknown or the template is inactive.
/// - `503 Service Unavailable` when the store cannot be read.
pub async fn process(
    store: web::Data<Store>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let template = web::block(move || store.get_template(&template_id)).await??;
    match template {
        Some(template) if template.is_active => Ok(HttpResponse::Ok().json(template)),
        _ => Err(ServiceError::NotFound("template")),
    }
}

#[cfg(test)]
mod tests {
    use crate::services::testing::test_app;
    use crate::store::testing::{template_input as input, temp_store};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::template::Template;

    #[actix_web::test]
    async fn returns_template_with_derived_fields() {
        let (_dir, store) = temp_store();
        let created = store
            .create_template(&input("cat", Some("**Nom:** /full_name")))
            .unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri(&format!("/api/templates/{}", created.id))
            .to_request();
        let template: Template = test::call_and_read_body_json(&app, req).await;
        assert_eq!(template.fields.len(), 1);
        assert_eq!(template.fields[0].label, "Full Name");
    }

    #[actix_web::test]
    async fn unknown_template_gives_json_404() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/templates/nope").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "template not found");
    }
}
