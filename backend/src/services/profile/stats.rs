use actix_web::{web, HttpResponse};
use chrono::Utc;

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(ctx: RequestContext, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let store = store.into_inner();
    let stats = web::block(move || store.user_stats(&uid, Utc::now())).await??;
    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use crate::context::USER_ID_HEADER;
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::test;
    use common::model::profile::UserStats;
    use common::requests::SaveFormRequest;

    #[actix_web::test]
    async fn counts_the_callers_activity() {
        let (_dir, store) = temp_store();
        store
            .create_saved_form(
                "uid-a",
                &SaveFormRequest {
                    template_id: "tpl".to_string(),
                    title: "Brouillon".to_string(),
                    values: Default::default(),
                },
            )
            .unwrap();
        let doc = store.record_generated_document("uid-a", "tpl", "pdf", "A").unwrap();
        store.increment_download_count("uid-a", &doc.id).unwrap();
        store.record_generated_document("uid-b", "tpl", "pdf", "B").unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/profile/stats")
            .insert_header((USER_ID_HEADER, "uid-a"))
            .to_request();
        let stats: UserStats = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            stats,
            UserStats {
                saved_forms_count: 1,
                generated_docs_count: 1,
                this_month_count: 1,
                total_downloads: 2,
            }
        );
    }
}
