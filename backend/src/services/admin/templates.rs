//! Template management. The stored field list is never taken from the
//! payload as-is: the store derives it from `markdownContent`, applying the
//! payload's `fields` only as overrides for tokens still present.

use actix_web::{web, HttpResponse};
use common::form::invalid_pattern;
use common::model::template::TemplateInput;
use log::info;

use crate::context::AdminGuard;
use crate::error::ServiceError;
use crate::store::Store;

fn check(input: &TemplateInput) -> Result<(), ServiceError> {
    if input.name.trim().is_empty() || input.name_ar.trim().is_empty() {
        return Err(ServiceError::BadRequest("template name is required in both languages".into()));
    }
    if input.category_id.trim().is_empty() {
        return Err(ServiceError::BadRequest("template category is required".into()));
    }
    if let Some((field, e)) = invalid_pattern(&input.fields) {
        return Err(ServiceError::InvalidField {
            field: field.id.clone(),
            reason: format!("invalid pattern: {e}"),
        });
    }
    Ok(())
}

pub async fn list(_admin: AdminGuard, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let templates = web::block(move || store.list_templates()).await??;
    Ok(HttpResponse::Ok().json(templates))
}

pub async fn create(
    _admin: AdminGuard,
    store: web::Data<Store>,
    payload: web::Json<TemplateInput>,
) -> Result<HttpResponse, ServiceError> {
    let input = payload.into_inner();
    check(&input)?;
    let store = store.into_inner();
    let template = web::block(move || store.create_template(&input)).await??;
    info!(
        "Created template {} with {} field(s)",
        template.id,
        template.fields.len()
    );
    Ok(HttpResponse::Created().json(template))
}

pub async fn update(
    _admin: AdminGuard,
    store: web::Data<Store>,
    template_id: web::Path<String>,
    payload: web::Json<TemplateInput>,
) -> Result<HttpResponse, ServiceError> {
    let input = payload.into_inner();
    check(&input)?;
    let store = store.into_inner();
    let template = web::block(move || store.update_template(&template_id, &input))
        .await??
        .ok_or(ServiceError::NotFound("template"))?;
    info!(
        "Updated template {} with {} field(s)",
        template.id,
        template.fields.len()
    );
    Ok(HttpResponse::Ok().json(template))
}

pub async fn remove(
    _admin: AdminGuard,
    store: web::Data<Store>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let deleted = web::block(move || store.delete_template(&template_id)).await??;
    if !deleted {
        return Err(ServiceError::NotFound("template"));
    }
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{admin_header, test_app};
    use crate::store::testing::{template_input, temp_store};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::field::{Field, FieldType, FieldValidation};
    use common::model::template::Template;
    use common::requests::ErrorBody;

    #[actix_web::test]
    async fn saving_derives_fields_from_the_body() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let mut input = template_input("cat", Some("Nom: /full_name\nEmail: /email\n/full_name"));
        let mut email = Field::text("email", "Courriel", "البريد الإلكتروني");
        email.field_type = FieldType::Email;
        input.fields = vec![email, Field::text("ghost", "Ghost", "ghost")];

        let req = test::TestRequest::post()
            .uri("/api/admin/templates")
            .insert_header(admin_header())
            .set_json(&input)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Template = test::read_body_json(resp).await;

        let ids: Vec<&str> = created.fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["full_name", "email"]);
        assert_eq!(created.fields[1].field_type, FieldType::Email);
        assert_eq!(created.fields[1].label, "Courriel");
    }

    #[actix_web::test]
    async fn uncompilable_pattern_is_rejected_on_save() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let mut input = template_input("cat", Some("NIN: /nin"));
        let mut nin = Field::text("nin", "NIN", "رقم التعريف");
        nin.validation = Some(FieldValidation {
            pattern: Some(r"^(?=.*\d).+$".to_string()),
            ..Default::default()
        });
        input.fields = vec![nin];

        let req = test::TestRequest::post()
            .uri("/api/admin/templates")
            .insert_header(admin_header())
            .set_json(&input)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.field.as_deref(), Some("nin"));
        assert!(body.error.contains("invalid pattern"));
        assert!(store.list_templates().unwrap().is_empty());

        input.fields[0].validation = Some(FieldValidation {
            pattern: Some(r"\d{3}".to_string()),
            ..Default::default()
        });
        let req = test::TestRequest::post()
            .uri("/api/admin/templates")
            .insert_header(admin_header())
            .set_json(&input)
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn update_and_delete_unknown_template_give_404() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/api/admin/templates/missing")
            .insert_header(admin_header())
            .set_json(template_input("cat", None))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let req = test::TestRequest::delete()
            .uri("/api/admin/templates/missing")
            .insert_header(admin_header())
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn admin_listing_includes_inactive_templates() {
        let (_dir, store) = temp_store();
        let mut draft = template_input("cat", Some("/x"));
        draft.is_active = false;
        store.create_template(&draft).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/admin/templates")
            .insert_header(admin_header())
            .to_request();
        let all: Vec<Template> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 1);

        let req = test::TestRequest::get().uri("/api/admin/templates").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
