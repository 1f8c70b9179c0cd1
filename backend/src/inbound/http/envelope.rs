//! The response envelope wrapping every outgoing body.
//!
//! ```text
//! { "success": true, "statusCode": 200, "data": [...], "message": "Success" }
//! ```
//!
//! `success` is never stored: it is derived from the status code whenever the
//! envelope is serialised, so it cannot disagree with the status sent.

use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::de::{self, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};

/// Message used on success paths when a handler does not supply one.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Success";

/// Uniform wire shape for every response body.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use faq_backend::inbound::http::Envelope;
///
/// let envelope = Envelope::ok(vec!["a", "b"]);
/// assert!(envelope.success());
/// assert_eq!(envelope.message(), "Success");
///
/// let failure = Envelope::<()>::failure(StatusCode::CONFLICT, "duplicate");
/// assert!(!failure.success());
/// assert!(failure.data().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    status: StatusCode,
    data: Option<T>,
    message: String,
}

impl<T> Envelope<T> {
    /// Build an envelope from a status, optional payload and optional message.
    ///
    /// The message defaults to [`DEFAULT_SUCCESS_MESSAGE`].
    pub fn new(status: StatusCode, data: Option<T>, message: Option<String>) -> Self {
        Self {
            status,
            data,
            message: message.unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_owned()),
        }
    }

    /// 200 OK carrying `data`.
    pub fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, Some(data), None)
    }

    /// 201 Created carrying `data`.
    pub fn created(data: T) -> Self {
        Self::new(StatusCode::CREATED, Some(data), None)
    }

    /// Failure envelope; `data` is always null.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status, None, Some(message.into()))
    }

    /// Replace the message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// `true` whenever the status is below 400.
    pub fn success(&self) -> bool {
        self.status.as_u16() < 400
    }

    /// HTTP status sent with the envelope.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Payload, if any.
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl<T: Serialize> Envelope<T> {
    /// Render the envelope as a JSON response with a matching status line.
    pub fn to_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(self)
    }
}

impl<T: Serialize> Serialize for Envelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Envelope", 4)?;
        state.serialize_field("success", &self.success())?;
        state.serialize_field("statusCode", &self.status.as_u16())?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("message", &self.message)?;
        state.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
struct EnvelopeDto<T> {
    success: bool,
    status_code: u16,
    data: Option<T>,
    message: String,
}

/// Validation failures raised when reading an envelope back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeValidationError {
    /// The status code is not a valid HTTP status.
    #[error("invalid status code {0}")]
    InvalidStatus(u16),
    /// `success` disagrees with the status code.
    #[error("success flag {success} contradicts status code {status}")]
    InconsistentSuccess {
        /// Flag found on the wire.
        success: bool,
        /// Status found on the wire.
        status: u16,
    },
}

impl<T> TryFrom<EnvelopeDto<T>> for Envelope<T> {
    type Error = EnvelopeValidationError;

    fn try_from(value: EnvelopeDto<T>) -> Result<Self, Self::Error> {
        let EnvelopeDto {
            success,
            status_code,
            data,
            message,
        } = value;

        let status = StatusCode::from_u16(status_code)
            .map_err(|_| EnvelopeValidationError::InvalidStatus(status_code))?;
        let envelope = Self::new(status, data, Some(message));
        if envelope.success() != success {
            return Err(EnvelopeValidationError::InconsistentSuccess {
                success,
                status: status_code,
            });
        }
        Ok(envelope)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let dto = EnvelopeDto::<T>::deserialize(deserializer)?;
        Self::try_from(dto).map_err(de::Error::custom)
    }
}

impl<T: Serialize> Responder for Envelope<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.to_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[case(StatusCode::OK, true)]
    #[case(StatusCode::CREATED, true)]
    #[case(StatusCode::PERMANENT_REDIRECT, true)]
    #[case(StatusCode::BAD_REQUEST, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn success_is_derived_from_status(#[case] status: StatusCode, #[case] expected: bool) {
        let envelope = Envelope::<()>::new(status, None, None);
        assert_eq!(envelope.success(), expected);
    }

    #[rstest]
    fn ok_serialises_with_default_message() {
        let value = serde_json::to_value(Envelope::ok(json!({"id": 1}))).expect("serialises");

        assert_eq!(
            value,
            json!({"success": true, "statusCode": 200, "data": {"id": 1}, "message": "Success"})
        );
    }

    #[rstest]
    fn failure_serialises_null_data() {
        let value = serde_json::to_value(Envelope::<Value>::failure(StatusCode::CONFLICT, "dup"))
            .expect("serialises");

        assert_eq!(
            value,
            json!({"success": false, "statusCode": 409, "data": null, "message": "dup"})
        );
    }

    #[rstest]
    fn deserialise_rejects_contradictory_success() {
        let raw = json!({"success": true, "statusCode": 500, "data": null, "message": "x"});
        let result: Result<Envelope<Value>, _> = serde_json::from_value(raw);
        let err = result.expect_err("contradiction rejected");
        assert!(err.to_string().contains("contradicts"));
    }

    #[rstest]
    fn deserialise_accepts_consistent_payload() {
        let raw = json!({"success": false, "statusCode": 404, "data": null, "message": "gone"});
        let envelope: Envelope<Value> = serde_json::from_value(raw).expect("valid envelope");
        assert_eq!(envelope.status(), StatusCode::NOT_FOUND);
        assert_eq!(envelope.message(), "gone");
    }

    #[rstest]
    #[actix_web::test]
    async fn response_status_mirrors_envelope() {
        let response = Envelope::created("made").with_message("FAQ created").to_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body: Value = serde_json::from_slice(&bytes).expect("json body");
        assert_eq!(body["statusCode"], 201);
        assert_eq!(body["message"], "FAQ created");
    }
}
