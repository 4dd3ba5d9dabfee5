//! # Admin Service
//!
//! Everything under `/api/admin`. `POST /auth` checks a credential pair and
//! answers with a binary signal; every other route requires the same pair as
//! HTTP Basic authorization (see [`crate::context::AdminGuard`]).
//!
//! ## Registered Routes:
//!
//! *   **`POST /auth`**: `{email, password}` -> `{success: true}` or `401`.
//! *   **`GET /categories`**, **`POST /categories`**,
//!     **`PUT /categories/{id}`**, **`DELETE /categories/{id}`**: category
//!     management, inactive categories included.
//! *   **`GET /templates`**, **`POST /templates`**,
//!     **`PUT /templates/{id}`**, **`DELETE /templates/{id}`**: template
//!     management. Saving re-derives the field list from the Markdown body.

mod auth;
mod categories;
mod templates;

use actix_web::web::{delete, get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/admin";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/auth", post().to(auth::process))
        .route("/categories", get().to(categories::list))
        .route("/categories", post().to(categories::create))
        .route("/categories/{category_id}", put().to(categories::update))
        .route("/categories/{category_id}", delete().to(categories::remove))
        .route("/templates", get().to(templates::list))
        .route("/templates", post().to(templates::create))
        .route("/templates/{template_id}", put().to(templates::update))
        .route("/templates/{template_id}", delete().to(templates::remove))
}
