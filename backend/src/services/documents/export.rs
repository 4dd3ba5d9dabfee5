use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use common::requests::{ExportRequest, DOCUMENT_ID_HEADER};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::export::Exporter;
use crate::store::Store;

/// Handler for `POST /api/documents/export/{template_id}`.
///
/// The frame locale is the one in the payload, falling back to the request's.
/// When a history entry was written its id is returned in `X-Document-Id`.
pub async fn process(
    ctx: RequestContext,
    store: web::Data<Store>,
    exporter: web::Data<Exporter>,
    template_id: web::Path<String>,
    payload: web::Json<ExportRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = payload.into_inner();
    let locale = request.locale.unwrap_or(ctx.locale);
    let identity = ctx.identity;
    let store = store.into_inner();
    let exporter = exporter.into_inner();

    let exported = web::block(move || {
        exporter.export(&store, &template_id, &request, locale, identity.as_ref())
    })
    .await??;

    let mut response = HttpResponse::Ok();
    response
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(exported.filename)],
        });
    if let Some(record) = &exported.record {
        response.insert_header((DOCUMENT_ID_HEADER, record.id.as_str()));
    }
    Ok(response.body(exported.bytes))
}

#[cfg(test)]
mod tests {
    use crate::context::USER_ID_HEADER;
    use crate::services::testing::test_app;
    use crate::store::testing::{template_input, temp_store};
    use actix_web::http::header::CONTENT_DISPOSITION;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::field::Field;
    use common::requests::{ErrorBody, ExportRequest, DOCUMENT_ID_HEADER};

    fn request(pairs: &[(&str, &str)]) -> ExportRequest {
        ExportRequest {
            values: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn identified_export_returns_pdf_and_records_history() {
        let (_dir, store) = temp_store();
        let template = store
            .create_template(&template_input("cat", Some("Nom: /full_name")))
            .unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/export/{}", template.id))
            .insert_header((USER_ID_HEADER, "uid-a"))
            .set_json(request(&[("full_name", "Amina")]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("content-type").unwrap(), "application/pdf");
        let disposition = resp
            .headers()
            .get(CONTENT_DISPOSITION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(disposition.starts_with("attachment"));
        assert!(disposition.contains(&format!("{}-", template.id)));

        let document_id = resp
            .headers()
            .get(DOCUMENT_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        let body = test::read_body(resp).await;
        assert!(body.starts_with(b"%PDF"));

        let history = store.list_generated_documents("uid-a").unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, document_id);
        assert_eq!(history[0].title, template.name);
    }

    #[actix_web::test]
    async fn anonymous_export_writes_no_history() {
        let (_dir, store) = temp_store();
        let template = store
            .create_template(&template_input("cat", Some("Date: /date")))
            .unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/export/{}", template.id))
            .set_json(request(&[("date", "2024-01-01")]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().get(DOCUMENT_ID_HEADER).is_none());

        let count: i64 = store
            .connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM generated_documents", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[actix_web::test]
    async fn empty_body_is_unprocessable() {
        let (_dir, store) = temp_store();
        let template = store.create_template(&template_input("cat", Some("   "))).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/export/{}", template.id))
            .insert_header((USER_ID_HEADER, "uid-a"))
            .set_json(request(&[]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert!(body.error.contains("no markdown body"));
        assert!(store.list_generated_documents("uid-a").unwrap().is_empty());
    }

    #[actix_web::test]
    async fn missing_required_value_is_unprocessable() {
        let (_dir, store) = temp_store();
        let mut input = template_input("cat", Some("Nom: /full_name"));
        let mut name = Field::text("full_name", "Nom complet", "الاسم الكامل");
        name.required = true;
        input.fields = vec![name];
        let template = store.create_template(&input).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/export/{}", template.id))
            .set_json(request(&[("full_name", "")]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[actix_web::test]
    async fn unknown_template_is_not_found() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/documents/export/missing")
            .set_json(request(&[]))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
