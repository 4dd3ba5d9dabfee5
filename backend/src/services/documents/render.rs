use actix_web::{web, HttpResponse};
use chrono::Utc;
use common::requests::{ExportRequest, RenderResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::export::{ExportError, Exporter};
use crate::store::Store;

pub async fn process(
    ctx: RequestContext,
    store: web::Data<Store>,
    exporter: web::Data<Exporter>,
    template_id: web::Path<String>,
    payload: web::Json<ExportRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = payload.into_inner();
    let locale = request.locale.unwrap_or(ctx.locale);
    let store = store.into_inner();
    let id = template_id.into_inner();

    let template = {
        let id = id.clone();
        web::block(move || store.get_template(&id)).await??
    }
    .ok_or(ExportError::TemplateNotFound(id))?;

    let html = exporter.render_html(&template, &request, locale, Utc::now())?;
    Ok(HttpResponse::Ok().json(RenderResponse { html }))
}

#[cfg(test)]
mod tests {
    use crate::services::testing::test_app;
    use crate::store::testing::{template_input, temp_store};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::locale::Locale;
    use common::requests::{ExportRequest, RenderResponse};

    #[actix_web::test]
    async fn returns_framed_html_in_the_requested_locale() {
        let (_dir, store) = temp_store();
        let template = store
            .create_template(&template_input("cat", Some("Date: /date\n\nNom: /name")))
            .unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/render/{}", template.id))
            .set_json(ExportRequest {
                values: [("date".to_string(), "2024-01-01".to_string())].into_iter().collect(),
                locale: Some(Locale::Ar),
                title: None,
            })
            .to_request();
        let rendered: RenderResponse = test::call_and_read_body_json(&app, req).await;

        assert!(rendered.html.contains("dir=\"rtl\""));
        assert!(rendered.html.contains("2024-01-01"));
        assert!(rendered.html.contains("____________________"));
        assert!(!rendered.html.contains("/date"));
    }

    #[actix_web::test]
    async fn metadata_only_template_is_unprocessable() {
        let (_dir, store) = temp_store();
        let template = store.create_template(&template_input("cat", None)).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri(&format!("/api/documents/render/{}", template.id))
            .set_json(ExportRequest::default())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
