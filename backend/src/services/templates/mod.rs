//! # Template Catalog Service
//!
//! Public read access to active templates under `/api/templates`. Creating,
//! editing and deleting templates goes through the admin service.
//!
//! ## Registered Routes:
//!
//! *   **`GET /`**:
//!     - **Handler**: `list::process`
//!     - **Description**: Active templates, lowest `order` first. With
//!       `?category=<id>` only the active templates of that category.
//!
//! *   **`GET /{template_id}`**:
//!     - **Handler**: `get::process`
//!     - **Description**: One active template with its Markdown body and the
//!       field list derived from it. Inactive or unknown ids give `404`.

mod get;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{template_id}", get().to(get::process))
}
