use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::ServiceError;
use crate::store::Store;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    category: Option<String>,
}

pub async fn process(
    store: web::Data<Store>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, ServiceError> {
    let store = store.into_inner();
    let category = query.into_inner().category.filter(|c| !c.is_empty());
    let templates = web::block(move || match category {
        Some(category_id) => store.list_active_templates_by_category(&category_id),
        None => store.list_active_templates(),
    })
    .await??;
    Ok(HttpResponse::Ok().json(templates))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::test_app;
    use crate::store::testing::{template_input as input, temp_store};
    use actix_web::test;
    use common::model::template::Template;

    #[actix_web::test]
    async fn lists_active_templates_optionally_by_category() {
        let (_dir, store) = temp_store();
        let work = store.create_template(&input("cat-work", Some("/name"))).unwrap();
        store.create_template(&input("cat-school", Some("/school"))).unwrap();
        let mut draft = input("cat-work", Some("/draft"));
        draft.is_active = false;
        store.create_template(&draft).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/templates").to_request();
        let all: Vec<Template> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(all.len(), 2);

        let req = test::TestRequest::get()
            .uri("/api/templates?category=cat-work")
            .to_request();
        let work_only: Vec<Template> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(work_only, vec![work]);
    }
}
