use actix_web::{web, HttpResponse};
use common::requests::PreferencesUpdate;

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

/// Fields absent from the payload keep their stored value.
pub async fn process(
    ctx: RequestContext,
    store: web::Data<Store>,
    payload: web::Json<PreferencesUpdate>,
) -> Result<HttpResponse, ServiceError> {
    let identity = ctx.require_identity()?.clone();
    let locale = ctx.locale;
    let update = payload.into_inner();
    let store = store.into_inner();

    let profile = web::block(move || {
        store.get_or_create_profile(&identity, locale)?;
        store.update_preferences(&identity.uid, &update)
    })
    .await??
    .ok_or(ServiceError::NotFound("profile"))?;
    Ok(HttpResponse::Ok().json(profile))
}

#[cfg(test)]
mod tests {
    use crate::context::USER_ID_HEADER;
    use crate::services::testing::test_app;
    use crate::store::testing::temp_store;
    use actix_web::test;
    use common::locale::{Locale, Theme};
    use common::model::profile::UserProfile;
    use common::requests::PreferencesUpdate;

    #[actix_web::test]
    async fn partial_updates_keep_the_other_preference() {
        let (_dir, store) = temp_store();
        let app = test_app!(store);

        let req = test::TestRequest::put()
            .uri("/api/profile/preferences")
            .insert_header((USER_ID_HEADER, "uid-a"))
            .set_json(PreferencesUpdate {
                theme: Some(Theme::Dark),
                ..Default::default()
            })
            .to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.preferences.theme, Theme::Dark);
        assert_eq!(profile.preferences.language, Locale::Fr);

        let req = test::TestRequest::put()
            .uri("/api/profile/preferences")
            .insert_header((USER_ID_HEADER, "uid-a"))
            .set_json(PreferencesUpdate {
                language: Some(Locale::Ar),
                ..Default::default()
            })
            .to_request();
        let profile: UserProfile = test::call_and_read_body_json(&app, req).await;
        assert_eq!(profile.preferences.theme, Theme::Dark);
        assert_eq!(profile.preferences.language, Locale::Ar);
    }
}
