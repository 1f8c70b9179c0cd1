//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;
use serde_json::{Value, json};

async fn body_json(response: HttpResponse) -> Value {
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    serde_json::from_slice(&bytes).expect("envelope JSON deserialisation succeeds")
}

#[rstest]
#[case(DomainError::bad_request("bad"), StatusCode::BAD_REQUEST)]
#[case(DomainError::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(DomainError::conflict("dup"), StatusCode::CONFLICT)]
#[case(DomainError::new(418, "teapot"), StatusCode::IM_A_TEAPOT)]
#[case(DomainError::upstream("down"), StatusCode::BAD_GATEWAY)]
fn status_code_matches_domain_status(#[case] err: DomainError, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

#[rstest]
#[actix_web::test]
async fn domain_error_renders_failure_envelope_only() {
    let err = DomainError::validation("Invalid FAQ payload", [json!({"field": "question"})])
        .with_origin("handler stack");

    let response = ResponseError::error_response(&err);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "statusCode": 400,
            "data": null,
            "message": "Invalid FAQ payload",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn internal_error_response_is_fixed() {
    let body = body_json(internal_error_response()).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "statusCode": 500,
            "data": null,
            "message": "Internal Server Error",
        })
    );
}

#[rstest]
#[actix_web::test]
async fn route_not_found_is_fixed() {
    let response = route_not_found().await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "success": false,
            "statusCode": 404,
            "data": null,
            "message": "The requested route does not exist.",
        })
    );
}

#[rstest]
fn repository_errors_are_server_faults() {
    let err = FaqRepositoryError::query("database error");
    assert_eq!(
        ResponseError::status_code(&err),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}
