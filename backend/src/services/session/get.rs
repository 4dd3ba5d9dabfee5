use actix_web::HttpResponse;
use common::requests::SessionResponse;

use crate::context::RequestContext;

pub async fn process(ctx: RequestContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        identity: ctx.identity,
        locale: ctx.locale,
    })
}
