//! # Category Catalog Service
//!
//! Public, read-only access to the active categories under `/api/categories`.
//! Mutations live in the admin service.
//!
//! *   **`GET /`**: active categories, lowest `order` first.
//! *   **`GET /{category_id}`**: one active category, or `404`.

mod get;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/categories";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{category_id}", get().to(get::process))
}
