//! Saving does not validate the values: a saved form is a draft and may be
//! incomplete. Validation happens when the form is exported.

use actix_web::{web, HttpResponse};
use common::requests::SaveFormRequest;
use log::debug;

use crate::context::RequestContext;
use crate::error::ServiceError;
use crate::store::Store;

fn check(request: &SaveFormRequest) -> Result<(), ServiceError> {
    if request.template_id.trim().is_empty() {
        return Err(ServiceError::BadRequest("templateId is required".into()));
    }
    if request.title.trim().is_empty() {
        return Err(ServiceError::BadRequest("title is required".into()));
    }
    Ok(())
}

pub async fn create(
    ctx: RequestContext,
    store: web::Data<Store>,
    payload: web::Json<SaveFormRequest>,
) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let request = payload.into_inner();
    check(&request)?;
    let store = store.into_inner();
    let form = web::block(move || store.create_saved_form(&uid, &request)).await??;
    debug!("Saved form {} for {}", form.id, form.user_id);
    Ok(HttpResponse::Created().json(form))
}

pub async fn update(
    ctx: RequestContext,
    store: web::Data<Store>,
    form_id: web::Path<String>,
    payload: web::Json<SaveFormRequest>,
) -> Result<HttpResponse, ServiceError> {
    let uid = ctx.require_identity()?.uid.clone();
    let request = payload.into_inner();
    check(&request)?;
    let store = store.into_inner();
    let form = web::block(move || store.update_saved_form(&uid, &form_id, &request))
        .await??
        .ok_or(ServiceError::NotFound("saved form"))?;
    Ok(HttpResponse::Ok().json(form))
}
