//! HTTP-facing error type shared by every service.

use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use common::requests::ErrorBody;
use log::error;
use thiserror::Error;

use crate::export::ExportError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("{0} not found")]
    NotFound(&'static str),

    /// The request carries no identity but the operation needs one.
    #[error("authentication required")]
    Unauthenticated,

    #[error("admin credentials required")]
    AdminRequired,

    #[error("{0}")]
    BadRequest(String),

    #[error("field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("background task failed")]
    Blocking(#[from] BlockingError),
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServiceError::Export(e) => e.status_code(),
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Unauthenticated | ServiceError::AdminRequired => StatusCode::UNAUTHORIZED,
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::InvalidField { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Blocking(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        // internals stay in the log
        let message = if status.is_server_error() {
            error!("{}", self);
            match status {
                StatusCode::SERVICE_UNAVAILABLE => "Service temporarily unavailable".to_string(),
                _ => "Internal server error".to_string(),
            }
        } else {
            self.to_string()
        };
        let field = match self {
            ServiceError::InvalidField { field, .. } => Some(field.clone()),
            _ => None,
        };
        HttpResponse::build(status).json(ErrorBody { error: message, field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Error as SqlError;

    #[test]
    fn store_failures_are_reported_generically() {
        let err = ServiceError::from(StoreError::from(SqlError::InvalidQuery));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.error_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn client_errors_keep_their_message() {
        assert_eq!(ServiceError::NotFound("template").to_string(), "template not found");
        assert_eq!(ServiceError::Unauthenticated.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ServiceError::BadRequest("title is empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
