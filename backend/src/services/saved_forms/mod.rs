//! # Saved Forms Service
//!
//! Named, resumable submissions belonging to the calling identity. Every
//! route requires an identity; forms of other identities behave as if they
//! did not exist.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/saved-forms`**: the caller's forms, most recently updated first.
//! *   **`POST /api/saved-forms`**: save a new form (`201`).
//! *   **`GET /api/saved-forms/{id}`**, **`PUT /api/saved-forms/{id}`**,
//!     **`DELETE /api/saved-forms/{id}`**: read, replace or remove one form.

mod delete;
mod get;
mod list;
mod save;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/saved-forms";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(save::create))
        .route("/{form_id}", get().to(get::process))
        .route("/{form_id}", put().to(save::update))
        .route("/{form_id}", delete().to(delete::process))
}
