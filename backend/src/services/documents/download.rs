use actix_web::{web, HttpResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(
    ctx: RequestContext,
    store: web::Data<Store>,
    document_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let store = store.into_inner();
    let document = web::block(move || store.increment_download_count(&uid, &document_id))
        .await??
        .ok_or(ServiceError::NotFound("document"))?;
    Ok(HttpResponse::Ok().json(document))
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
    async fn counts_downloads_of_own_documents_only() {
        let (_dir, store) = temp_store();
        let record = store
            .record_generated_document("uid-a", "tpl", "pdf", "Attestation")
            .unwrap();
        let app = test_app!(store);
        let uri = format!("/api/documents/{}/download", record.id);

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header((USER_ID_HEADER, "uid-a"))
            .to_request();
        let updated: GeneratedDocument = test::call_and_read_body_json(&app, req).await;
        assert_eq!(updated.download_count, 2);

        let req = test::TestRequest::post()
            .uri(&uri)
            .insert_header((USER_ID_HEADER, "uid-b"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
        let history = store.list_generated_documents("uid-a").unwrap();
        assert_eq!(history[0].download_count, 2);
    }
}
