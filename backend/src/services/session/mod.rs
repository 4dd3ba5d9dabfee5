//! # Session Service
//!
//! `GET /api/session` echoes what the backend resolved from the request
//! headers: the caller's identity (if any) and locale. The frontend calls it
//! at startup to build its application context.

mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/session";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}
