use actix_web::{web, HttpResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(ctx: RequestContext, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let store = store.into_inner();
    let documents = web::block(move || store.list_generated_documents(&uid)).await??;
    Ok(HttpResponse::Ok().json(documents))
}

#[cfg(test)]
mod tests {
    use crate::context::USER_ID_HEADER;
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::document::GeneratedDocument;

    #[actix_web::test]
    async fn history_belongs_to_the_caller() {
        let (_dir, store) = temp_store();
        store.record_generated_document("uid-a", "tpl", "pdf", "Attestation").unwrap();
        store.record_generated_document("uid-b", "tpl", "pdf", "Autre").unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/documents")
            .insert_header((USER_ID_HEADER, "uid-a"))
            .to_request();
        let documents: Vec<GeneratedDocument> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].title, "Attestation");

        let req = test::TestRequest::get().uri("/api/documents").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    }
}
