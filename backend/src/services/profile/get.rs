use actix_web::{web, HttpResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(ctx: RequestContext, store: web::Data<Store>) -> Result<HttpResponse, ServiceError> {
    let identity = ctx.require_identity()?.clone();
    let locale = ctx.locale;
    let store = store.into_inner();
    let profile = web::block(move || store.get_or_create_profile(&identity, locale)).await??;
    Ok(HttpResponse::Ok().json(profile))
}
