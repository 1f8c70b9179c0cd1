//! Global fault-handler stage.
//!
//! [`FaultBoundary`] wraps every other stage, so it is the last code to see a
//! response. It settles each outcome into exactly one envelope:
//!
//! - a [`DomainError`] keeps its status and message;
//! - a cross-origin rejection is translated into a [`DomainError`];
//! - anything else (extractor and body-parse faults, adapter failures,
//!   panics inside a handler) is logged and replaced by the fixed 500
//!   envelope. Internal detail never reaches the client.
//!
//! Failures raised as service errors (panics included) have no request left
//! to attach a response to, so they leave as an `InternalError` whose
//! response is the settled envelope.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::task::{Context, Poll};

use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::Method;
use actix_web::http::header::{self, HeaderMap};
use actix_web::{Error, HttpResponse};
use futures_util::FutureExt;
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::error;

use crate::domain::DomainError;

use super::cors::translate_cors_error;
use super::error::internal_error_response;

/// Middleware translating every failure into an envelope.
///
/// Register it with the final `wrap` call so it encloses all other stages.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use faq_backend::inbound::http::FaultBoundary;
///
/// let app = App::new().wrap(FaultBoundary);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FaultBoundary;

impl<S, B> Transform<S, ServiceRequest> for FaultBoundary
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = FaultBoundaryMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(FaultBoundaryMiddleware { service }))
    }
}

/// Service wrapper produced by [`FaultBoundary`].
pub struct FaultBoundaryMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for FaultBoundaryMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // Owned copies only: routing needs sole ownership of the request.
        let context = FaultContext {
            method: req.method().clone(),
            path: req.path().to_owned(),
        };
        let fut = self.service.call(req);
        Box::pin(async move {
            match AssertUnwindSafe(fut).catch_unwind().await {
                Ok(Ok(res)) => Ok(settle(res, &context)),
                Ok(Err(err)) => {
                    let response =
                        replacement_for(&context, &err).unwrap_or_else(|| err.error_response());
                    Err(InternalError::from_response(err, response).into())
                }
                Err(panic) => {
                    error!(
                        error = panic_message(panic.as_ref()),
                        method = %context.method,
                        path = %context.path,
                        "unexpected fault: handler panicked"
                    );
                    Err(InternalError::from_response(
                        "handler panicked",
                        internal_error_response(),
                    )
                    .into())
                }
            }
        })
    }
}

/// Request details kept for logging once the request has been handed on.
struct FaultContext {
    method: Method,
    path: String,
}

/// Replace an error-carrying response unless it already is a domain envelope.
fn settle<B>(res: ServiceResponse<B>, context: &FaultContext) -> ServiceResponse<BoxBody>
where
    B: MessageBody + 'static,
{
    let replacement = res.response().error().and_then(|err| {
        replacement_for(context, err).map(|mut response| {
            carry_cors_headers(res.response().headers(), response.headers_mut());
            response
        })
    });

    match replacement {
        Some(response) => {
            let (request, _) = res.into_parts();
            ServiceResponse::new(request, response)
        }
        None => res.map_into_boxed_body(),
    }
}

/// Decide the client-facing response for a raised error.
///
/// `None` means the error is a [`DomainError`] whose own rendering stands.
fn replacement_for(context: &FaultContext, err: &Error) -> Option<HttpResponse> {
    if err.as_error::<DomainError>().is_some() {
        return None;
    }
    if let Some(domain) = translate_cors_error(err) {
        return Some(actix_web::ResponseError::error_response(&domain));
    }
    error!(
        error = %err,
        method = %context.method,
        path = %context.path,
        "unexpected fault"
    );
    Some(internal_error_response())
}

fn carry_cors_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if name.as_str().starts_with("access-control-") || *name == header::VARY {
            to.append(name.clone(), value.clone());
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, web};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[derive(Debug, thiserror::Error)]
    #[error("x is not a function")]
    struct ProgrammingError;

    impl actix_web::ResponseError for ProgrammingError {}

    async fn call(path: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .wrap(FaultBoundary)
                .route(
                    "/domain",
                    web::get().to(|| async {
                        Err::<HttpResponse, _>(DomainError::conflict("already exists"))
                    }),
                )
                .route(
                    "/fault",
                    web::get().to(|| async { Err::<HttpResponse, _>(ProgrammingError) }),
                )
                .route("/panic", web::get().to(explode))
                .service(web::scope("/items").route(
                    "/{id}",
                    web::get().to(|id: web::Path<String>| async move {
                        HttpResponse::Ok().json(json!({"id": id.into_inner()}))
                    }),
                ))
                .route(
                    "/plain",
                    web::get().to(|| async { HttpResponse::NoContent().finish() }),
                ),
        )
        .await;
        let req = actix_test::TestRequest::get().uri(path).to_request();
        // Panics leave the boundary as an error carrying the envelope.
        let response = match app.call(req).await {
            Ok(res) => res.into_parts().1,
            Err(err) => err.error_response(),
        };
        let status = response.status();
        let bytes = to_bytes(response.into_body()).await.expect("body bytes");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    async fn explode() -> HttpResponse {
        panic!("x is not a function")
    }

    #[rstest]
    #[actix_web::test]
    async fn domain_errors_keep_status_and_message() {
        let (status, body) = call("/domain").await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body,
            json!({"success": false, "statusCode": 409, "data": null, "message": "already exists"})
        );
    }

    #[rstest]
    #[case("/fault")]
    #[case("/panic")]
    #[actix_web::test]
    async fn unexpected_faults_are_sanitised(#[case] path: &str) {
        let (status, body) = call(path).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({
                "success": false,
                "statusCode": 500,
                "data": null,
                "message": "Internal Server Error",
            })
        );
        assert!(!body.to_string().contains("x is not a function"));
    }

    #[rstest]
    #[actix_web::test]
    async fn successful_responses_pass_untouched() {
        let (status, body) = call("/plain").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[rstest]
    #[actix_web::test]
    async fn routed_requests_reach_their_handler() {
        let (status, body) = call("/items/42").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "42"}));
    }

    #[rstest]
    fn cors_headers_survive_replacement() {
        let mut from = HeaderMap::new();
        from.insert(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            header::HeaderValue::from_static("https://faq.example"),
        );
        from.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("text/plain"),
        );
        let mut to = HeaderMap::new();

        carry_cors_headers(&from, &mut to);

        assert!(to.contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
        assert!(!to.contains_key(header::CONTENT_TYPE));
    }

    #[rstest]
    fn panic_message_reads_common_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("boom");
        let owned: Box<dyn Any + Send> = Box::new(String::from("bang"));
        let other: Box<dyn Any + Send> = Box::new(7_u8);

        assert_eq!(panic_message(literal.as_ref()), "boom");
        assert_eq!(panic_message(owned.as_ref()), "bang");
        assert_eq!(panic_message(other.as_ref()), "non-string panic payload");
    }
}
