//! Body-parsing stage: JSON and form-encoded payload configuration.
//!
//! A malformed body is an unexpected fault, not a client-facing validation
//! error; the fault boundary answers it with the generic 500 envelope.

use actix_web::error::{JsonPayloadError, UrlencodedError};
use actix_web::{HttpRequest, ResponseError, web};

/// Largest accepted request body, in bytes.
pub const BODY_LIMIT: usize = 100 * 1024;

/// Failure to parse a request body.
#[derive(Debug, thiserror::Error)]
pub enum BodyParseFault {
    /// The JSON body could not be read or decoded.
    #[error("malformed JSON body: {0}")]
    Json(#[from] JsonPayloadError),
    /// The form-encoded body could not be read or decoded.
    #[error("malformed form body: {0}")]
    Form(#[from] UrlencodedError),
}

impl ResponseError for BodyParseFault {}

fn json_fault(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    BodyParseFault::from(err).into()
}

fn form_fault(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    BodyParseFault::from(err).into()
}

/// JSON extractor configuration registered on the app.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(json_fault)
}

/// Form extractor configuration registered on the app.
pub fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .limit(BODY_LIMIT)
        .error_handler(form_fault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use rstest::rstest;

    #[rstest]
    fn json_faults_are_server_errors() {
        let fault = BodyParseFault::from(JsonPayloadError::ContentType);
        assert_eq!(fault.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(fault.to_string().starts_with("malformed JSON body"));
    }

    #[rstest]
    fn form_faults_are_server_errors() {
        let fault = BodyParseFault::from(UrlencodedError::ContentType);
        assert_eq!(fault.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
