//! # Profile Service
//!
//! The calling identity's store-owned profile and dashboard counters. The
//! profile is created on first sight, with the request locale as the initial
//! language preference.
//!
//! ## Registered Routes:
//!
//! *   **`GET /api/profile`**: get-or-create; contact details are refreshed
//!     from the identity headers on every call.
//! *   **`PUT /api/profile/preferences`**: partial update of language and theme.
//! *   **`GET /api/profile/stats`**: saved forms, generated documents,
//!     documents generated this month, total downloads.

mod get;
mod preferences;
mod stats;

use actix_web::web::{get, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/profile";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(get::process))
        .route("/preferences", put().to(preferences::process))
        .route("/stats", get().to(stats::process))
}
