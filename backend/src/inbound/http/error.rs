//! HTTP adapter mapping for domain errors and unexpected faults.
//!
//! Purpose: keep `DomainError` transport agnostic while letting handlers
//! return it with `?`. Every other `ResponseError` is an unexpected fault;
//! its body is replaced by the fault boundary before it reaches a client.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

use crate::domain::DomainError;
use crate::domain::ports::FaqRepositoryError;

use super::envelope::Envelope;

/// Result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, actix_web::Error>;

/// Message sent by the catch-all stage.
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "The requested route does not exist.";

/// Message sent in place of any unexpected fault.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

fn status_for(error: &DomainError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

impl ResponseError for DomainError {
    fn status_code(&self) -> StatusCode {
        status_for(self)
    }

    fn error_response(&self) -> HttpResponse {
        Envelope::<()>::failure(status_for(self), self.message()).to_response()
    }
}

// Rendered as plain text by actix; the fault boundary sanitises it.
impl ResponseError for FaqRepositoryError {}

/// Fixed envelope sent for every unexpected fault.
pub fn internal_error_response() -> HttpResponse {
    Envelope::<()>::failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        .to_response()
}

/// Catch-all handler for requests no resource router claimed.
pub async fn route_not_found() -> HttpResponse {
    Envelope::<()>::failure(StatusCode::NOT_FOUND, ROUTE_NOT_FOUND_MESSAGE).to_response()
}

#[cfg(test)]
mod tests;
