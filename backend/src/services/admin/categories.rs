use actix_web::{web, HttpResponse};
use common::model::category::CategoryInput;
use log::info;

use crate::context::AdminGuard;
use crate::error::ServiceError;
use crate::store::Store;

fn check(input: &CategoryInput) -> Result<(), ServiceError> {
    if input.name.trim().is_empty() || input.name_ar.trim().is_empty() {
        return Err(ServiceError::BadRequest("category name is required in both languages".into()));
    }
    Ok(())
}

pub async fn list(_admin: AdminGuard, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let categories = web::block(move || store.list_categories()).await??;
    Ok(HttpResponse::Ok().json(categories))
}

pub async fn create(
    _admin: AdminGuard,
    store: web::Data<Store>,
    payload: web::Json<CategoryInput>,
) -> Result<HttpResponse, ServiceError> {
    let input = payload.into_inner();
    check(&input)?;
    let store = store.into_inner();
    let category = web::block(move || store.create_category(&input)).await??;
    info!("Created category {} ({})", category.id, category.name);
    Ok(HttpResponse::Created().json(category))
}

pub async fn update(
    _admin: AdminGuard,
    store: web::Data<Store>,
    category_id: web::Path<String>,
    payload: web::Json<CategoryInput>,
) -> Result<HttpResponse, ServiceError> {
    let input = payload.into_inner();
    check(&input)?;
    let store = store.into_inner();
    let category = web::block(move || store.update_category(&category_id, &input))
        .await??
        .ok_or(ServiceError::NotFound("category"))?;
    Ok(HttpResponse::Ok().json(category))
}

/// Templates referencing the category are kept.
pub async fn remove(
    _admin: AdminGuard,
    store: web::Data<Store>,
    category_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let id = category_id.into_inner();
    let deleted = {
        let id = id.clone();
        web::block(move || store.delete_category(&id)).await??
    };
    if !deleted {
        return Err(ServiceError::NotFound("category"));
    }
    info!("Deleted category {}", id);
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{admin_header, test_app};
    use crate::store::testing::{empty_store, template_input};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::category::{Category, CategoryInput};

    #[actix_web::test]
    async fn mutations_require_admin_credentials() {
        let (_dir, store) = empty_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/admin/categories")
            .set_json(CategoryInput::new("Banque", "البنك", "", "", 1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(store.list_categories().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn create_update_and_delete() {
        let (_dir, store) = empty_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/admin/categories")
            .insert_header(admin_header())
            .set_json(CategoryInput::new("Banque", "البنك", "", "", 1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Category = test::read_body_json(resp).await;

        let mut edit = CategoryInput::from(&created);
        edit.is_active = false;
        let req = test::TestRequest::put()
            .uri(&format!("/api/admin/categories/{}", created.id))
            .insert_header(admin_header())
            .set_json(&edit)
            .to_request();
        let updated: Category = test::call_and_read_body_json(&app, req).await;
        assert!(!updated.is_active);

        let req = test::TestRequest::get()
            .uri("/api/admin/categories")
            .insert_header(admin_header())
            .to_request();
        let all: Vec<Category> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 1);

        let template = store
            .create_template(&template_input(&created.id, Some("/x")))
            .unwrap();
        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/categories/{}", created.id))
            .insert_header(admin_header())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(store.get_template(&template.id).unwrap().is_some());

        let req = test::TestRequest::delete()
            .uri(&format!("/api/admin/categories/{}", created.id))
            .insert_header(admin_header())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn blank_names_are_rejected() {
        let (_dir, store) = empty_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/admin/categories")
            .insert_header(admin_header())
            .set_json(CategoryInput::new("Banque", "  ", "", "", 1))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
