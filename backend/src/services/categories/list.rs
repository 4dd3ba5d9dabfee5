use actix_web::{web, HttpResponse};

use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let categories = web::block(move || store.list_active_categories()).await??;
    Ok(HttpResponse::Ok().json(categories))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::test;
    use common::model::category::{Category, CategoryInput};

    #[actix_web::test]
    async fn lists_only_active_categories_in_order() {
        let (_dir, store) = temp_store();
        let mut hidden = CategoryInput::new("Cachée", "مخفية", "", "", 0);
        hidden.is_active = false;
        store.create_category(&hidden).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/categories").to_request();
        let categories: Vec<Category> = test::call_and_read_body_json(&app, req).await;

        assert_eq!(categories.len(), 9);
        assert!(categories.iter().all(|c| c.is_active));
        assert_eq!(categories[0].name, "Travail / Emploi");
    }
}
