use actix_web::{web, HttpResponse};

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

pub async fn process(
    ctx: RequestContext,
    store: web::Data<Store>,
    form_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let store = store.into_inner();
    let deleted = web::block(move || store.delete_saved_form(&uid, &form_id)).await??;
    if !deleted {
        return Err(ServiceError::NotFound("saved form"));
    }
    Ok(HttpResponse::NoContent().finish())
}
