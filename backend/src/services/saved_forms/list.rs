use actix_web::{web, HttpResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(ctx: RequestContext, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let store = store.into_inner();
    let forms = web::block(move || store.list_saved_forms(&uid)).await??;
    Ok(HttpResponse::Ok().json(forms))
}

#[cfg(test)]
mod tests {
    use crate::context::USER_ID_HEADER;
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::model::saved_form::SavedForm;
    use common::requests::SaveFormRequest;

    fn request(title: &str) -> SaveFormRequest {
        SaveFormRequest {
            template_id: "tpl".to_string(),
            title: title.to_string(),
            values: [("name".to_string(), "Amina".to_string())].into_iter().collect(),
        }
    }

    #[actix_web::test]
    async fn lists_only_the_callers_forms() {
        let (_dir, store) = temp_store();
        store.create_saved_form("uid-a", &request("mine")).unwrap();
        store.create_saved_form("uid-b", &request("theirs")).unwrap();
        let app = test_app!(store);

        let req = test::TestRequest::get()
            .uri("/api/saved-forms")
            .insert_header((USER_ID_HEADER, "uid-a"))
            .to_request();
        let forms: Vec<SavedForm> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].title, "mine");
    }

    #[actix_web::test]
    async fn anonymous_callers_are_rejected() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::get().uri("/api/saved-forms").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
