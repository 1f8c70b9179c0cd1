//! Tests for domain error construction and defaults.

use super::*;
use rstest::rstest;
use serde_json::json;

#[rstest]
fn new_applies_defaults() {
    let err = DomainError::new(422, "bad input");

    assert_eq!(err.status_code(), 422);
    assert_eq!(err.message(), "bad input");
    assert_eq!(err.category(), DEFAULT_CATEGORY);
    assert!(err.errors().is_empty());
    assert!(!err.success());
}

#[rstest]
fn from_status_uses_placeholder_message() {
    let err = DomainError::from_status(409);
    assert_eq!(err.message(), DEFAULT_MESSAGE);
    assert_eq!(err.status_code(), 409);
}

#[rstest]
#[case(200)]
#[case(302)]
#[case(399)]
#[case(600)]
fn new_collapses_non_error_status_to_500(#[case] status: u16) {
    let err = DomainError::new(status, "odd");
    assert_eq!(err.status_code(), 500);
}

#[rstest]
#[case(200)]
#[case(600)]
fn try_new_rejects_non_error_status(#[case] status: u16) {
    let result = DomainError::try_new(status, "odd");
    assert!(matches!(
        result,
        Err(DomainErrorValidationError::StatusOutOfRange(code)) if code == status
    ));
}

#[rstest]
fn try_new_rejects_blank_message() {
    let result = DomainError::try_new(400, "   ");
    assert!(matches!(result, Err(DomainErrorValidationError::EmptyMessage)));
}

#[rstest]
#[case("")]
#[case("  ")]
fn new_keeps_supplied_message(#[case] message: &str) {
    let err = DomainError::new(400, message);
    assert_eq!(err.message(), message);
}

#[rstest]
#[case(DomainError::bad_request("x"), 400, "BAD_REQUEST")]
#[case(DomainError::not_found("x"), 404, "NOT_FOUND")]
#[case(DomainError::conflict("x"), 409, "CONFLICT")]
#[case(DomainError::upstream("x"), 502, "UPSTREAM")]
fn convenience_constructors_set_status_and_category(
    #[case] err: DomainError,
    #[case] status: u16,
    #[case] category: &str,
) {
    assert_eq!(err.status_code(), status);
    assert_eq!(err.category(), category);
}

#[rstest]
fn validation_keeps_error_order() {
    let err = DomainError::validation(
        "invalid FAQ",
        [json!({"field": "question"}), json!({"field": "answer"})],
    );

    assert_eq!(err.category(), "VALIDATION");
    assert_eq!(
        err.errors(),
        &[json!({"field": "question"}), json!({"field": "answer"})]
    );
}

#[rstest]
fn origin_is_captured_unless_supplied() {
    let captured = DomainError::bad_request("x");
    assert!(matches!(captured.origin(), Origin::Captured(_)));

    let supplied = DomainError::bad_request("x").with_origin("at handler");
    assert!(matches!(supplied.origin(), Origin::Supplied(trace) if trace == "at handler"));
    assert_eq!(supplied.origin().to_string(), "at handler");
}

#[rstest]
fn display_is_the_message() {
    let err = DomainError::conflict("question already exists");
    assert_eq!(err.to_string(), "question already exists");
}

#[rstest]
#[case(DomainError::bad_request("x"), true)]
#[case(DomainError::upstream("x"), false)]
fn client_errors_are_4xx(#[case] err: DomainError, #[case] expected: bool) {
    assert_eq!(err.is_client_error(), expected);
}
