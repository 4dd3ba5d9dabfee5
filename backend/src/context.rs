//! Per-request context extractors.
//!
//! Identity comes from the authenticating proxy in front of the service as
//! plain headers; the service never verifies tokens itself, which is why it
//! binds to loopback unless configured otherwise. Locale comes from
//! `X-Locale`, then `Accept-Language`, then defaults to French.

use actix_web::dev::Payload;
use actix_web::http::header::{HeaderMap, ACCEPT_LANGUAGE, AUTHORIZATION};
use actix_web::{web, FromRequest, HttpRequest};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::locale::Locale;
use common::model::profile::Identity;
use futures_util::future::{ready, Ready};
use log::warn;

use crate::config::AdminConfig;
use crate::error::ServiceError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const USER_EMAIL_HEADER: &str = "X-User-Email";
pub const USER_NAME_HEADER: &str = "X-User-Name";
pub const USER_PHOTO_HEADER: &str = "X-User-Photo";
pub const LOCALE_HEADER: &str = "X-Locale";

/// Who is calling and in which language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub identity: Option<Identity>,
    pub locale: Locale,
}

impl RequestContext {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let identity = header(USER_ID_HEADER).map(|uid| Identity {
            uid,
            email: header(USER_EMAIL_HEADER),
            display_name: header(USER_NAME_HEADER),
            photo_url: header(USER_PHOTO_HEADER),
        });
        let locale = header(LOCALE_HEADER)
            .or_else(|| header(ACCEPT_LANGUAGE.as_str()))
            .map(|tag| Locale::from_tag(&tag))
            .unwrap_or_default();

        Self { identity, locale }
    }

    /// The caller's identity, or `Unauthenticated`.
    pub fn require_identity(&self) -> Result<&Identity, ServiceError> {
        self.identity.as_ref().ok_or(ServiceError::Unauthenticated)
    }
}

impl FromRequest for RequestContext {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_headers(req.headers())))
    }
}

/// Proof that the request carried valid admin credentials as HTTP Basic
/// authorization. Handlers taking it are rejected with 401 otherwise.
#[derive(Debug)]
pub struct AdminGuard;

/// `(email, password)` from a `Basic` authorization header value.
pub fn basic_credentials(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?.trim();
    let decoded = String::from_utf8(BASE64.decode(encoded).ok()?).ok()?;
    let (email, password) = decoded.split_once(':')?;
    Some((email.to_string(), password.to_string()))
}

impl FromRequest for AdminGuard {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let Some(admin) = req.app_data::<web::Data<AdminConfig>>() else {
            warn!("Admin configuration missing from app data");
            return ready(Err(ServiceError::AdminRequired));
        };
        let accepted = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(basic_credentials)
            .is_some_and(|(email, password)| admin.accepts(&email, &password));

        ready(if accepted { Ok(AdminGuard) } else { Err(ServiceError::AdminRequired) })
    }
}
