use actix_web::{web, HttpResponse};
use common::requests::{AdminAuthResponse, AdminCredentials};
use log::{info, warn};

use crate::config::AdminConfig;

/// Handler for `POST /api/admin/auth`.
///
/// The frontend keeps the accepted pair for the rest of its admin session and
/// sends it as Basic authorization on every admin call.
pub async fn process(admin: web::Data<AdminConfig>, payload: web::Json<AdminCredentials>) -> HttpResponse {
    if admin.accepts(&payload.email, &payload.password) {
        info!("Admin session opened for {}", payload.email.trim());
        HttpResponse::Ok().json(AdminAuthResponse {
            success: true,
            message: None,
        })
    } else {
        warn!("Rejected admin credentials for {}", payload.email.trim());
        HttpResponse::Unauthorized().json(AdminAuthResponse {
            success: false,
            message: Some("Invalid credentials".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::services::testing::{test_app, ADMIN_EMAIL, ADMIN_PASSWORD};
    use crate::store::testing::temp_store;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use common::requests::{AdminAuthResponse, AdminCredentials};

    #[actix_web::test]
    async fn accepts_only_the_configured_pair() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::post()
            .uri("/api/admin/auth")
            .set_json(AdminCredentials {
                email: ADMIN_EMAIL.to_string(),
                password: ADMIN_PASSWORD.to_string(),
            })
            .to_request();
        let ok: AdminAuthResponse = test::call_and_read_body_json(&app, req).await;
        assert!(ok.success);

        let req = test::TestRequest::post()
            .uri("/api/admin/auth")
            .set_json(AdminCredentials {
                email: ADMIN_EMAIL.to_string(),
                password: "wrong".to_string(),
            })
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: AdminAuthResponse = test::read_body_json(resp).await;
        assert!(!body.success);
    }
}
