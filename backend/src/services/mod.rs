//! HTTP API. Each sub-module owns one path prefix and exposes its routes
//! through `configure_routes()`.

pub mod admin;
pub mod categories;
pub mod documents;
pub mod profile;
pub mod saved_forms;
pub mod session;
pub mod templates;

use actix_web::web;

/// Registers every API scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(session::configure_routes())
        .service(categories::configure_routes())
        .service(templates::configure_routes())
        .service(admin::configure_routes())
        .service(saved_forms::configure_routes())
        .service(documents::configure_routes())
        .service(profile::configure_routes());
}
