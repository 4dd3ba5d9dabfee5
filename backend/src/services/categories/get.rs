use actix_web::{web, HttpResponse};

use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(
    store: web::Data<Store>,
    category_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let category = web::block(move || store.get_category(&category_id)).await??;
    match category {
        Some(category) if category.is_active => Ok(HttpResponse::Ok().json(category)),
        _ => Err(ServiceError::NotFound("category")),
    }
}

#[cfg(test)]
mod tests {
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::category::{Category, CategoryInput};

    #[actix_web::test]
    async fn inactive_or_unknown_category_is_not_found() {
        let (_dir, store) = temp_store();
        let mut input = CategoryInput::new("Archivée", "مؤرشفة", "", "", 10);
        input.is_active = false;
        let hidden = store.create_category(&input).unwrap();
        let visible = store.list_categories().unwrap().remove(0);
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri(&format!("/api/categories/{}", visible.id))
            .to_request();
        let category: Category = test::call_and_read_body_json(&app, req).await;
        assert_eq!(category.id, visible.id);

        for id in [hidden.id.as_str(), "missing"] {
            let req = test::TestRequest::get()
                .uri(&format!("/api/categories/{id}"))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        }
    }
}
