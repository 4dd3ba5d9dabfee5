//! # Documents Service
//!
//! Export of filled templates and the caller's generation history.
//!
//! ## Registered Routes:
//!
//! *   **`POST /api/documents/export/{template_id}`**: validates the submitted
//!     values, renders the template and answers with the PDF as an
//!     attachment. Anonymous callers may export; a history record is only
//!     written for identified callers.
//! *   **`POST /api/documents/render/{template_id}`**: same pipeline up to the
//!     framed HTML, returned as `{html}`.
//! *   **`GET /api/documents`**: the caller's history, newest first.
//! *   **`POST /api/documents/{id}/download`**: counts one more download of a
//!     history entry.

mod download;
mod export;
mod history;
mod render;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/documents";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(history::process))
        .route("/export/{template_id}", post().to(export::process))
        .route("/render/{template_id}", post().to(render::process))
        .route("/{document_id}/download", post().to(download::process))
}
