//! Cross-origin stage.
//!
//! An absent origin (or `*`) allows any origin. Otherwise a request whose
//! `Origin` differs from the configured one is rejected by `actix-cors`,
//! preflight or not; the rejection is translated into a [`DomainError`] so it
//! still leaves as an envelope. Requests without an `Origin` header pass.

use actix_cors::{Cors, CorsError};
use actix_web::http::Method;
use actix_web::{Error, ResponseError};

use crate::domain::DomainError;

const PREFLIGHT_MAX_AGE_SECS: usize = 3600;

/// Build the cross-origin policy for the configured origin.
pub fn cors_policy(allowed_origin: Option<&str>) -> Cors {
    let policy = Cors::default()
        .allowed_methods([
            Method::GET,
            Method::HEAD,
            Method::PUT,
            Method::PATCH,
            Method::POST,
            Method::DELETE,
        ])
        .allow_any_header()
        .max_age(PREFLIGHT_MAX_AGE_SECS);

    match allowed_origin {
        Some(origin) if origin != "*" => policy
            .allowed_origin(origin)
            .block_on_origin_mismatch(true),
        _ => policy.allow_any_origin().send_wildcard(),
    }
}

/// Translate a cross-origin rejection into a domain error.
pub(crate) fn translate_cors_error(err: &Error) -> Option<DomainError> {
    let cors = err.as_error::<CorsError>()?;
    Some(
        DomainError::new(cors.status_code().as_u16(), cors.to_string())
            .with_category("CORS")
            .with_origin("cross-origin stage"),
    )
}
