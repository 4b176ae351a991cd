//! Tests for request error normalization and request lifecycle.

use relief_api::{
    FetchFailure, NON_FIELD_ERROR, Request, RequestState, ResponseError, normalize_error,
};

// ============================================================================
// Error Normalization
// ============================================================================

#[test]
fn test_network_failure() {
    let error = normalize_error(FetchFailure::Network("connection reset".to_string()));
    assert_eq!(error.message_for_notification, "Network error");
    assert_eq!(error.non_field_message(), Some("Network error"));
    assert_eq!(error.status, None);
    assert!(error.is_retryable());
}

#[test]
fn test_unparsable_body() {
    let error = normalize_error(FetchFailure::http(502, "<html>Bad Gateway</html>"));
    assert_eq!(
        error.message_for_notification,
        "Unexpected response from server"
    );
    assert_eq!(error.status, Some(502));
    assert!(error.is_retryable());

    let error = normalize_error(FetchFailure::http(400, "[\"not\", \"an object\"]"));
    assert_eq!(
        error.message_for_notification,
        "Unexpected response from server"
    );
}

#[test]
fn test_parse_failure() {
    let error = normalize_error(FetchFailure::Parse("expected value".to_string()));
    assert_eq!(
        error.message_for_notification,
        "Unexpected response from server"
    );
}

#[test]
fn test_wrapped_field_errors() {
    let body = r#"{
        "errors": {
            "summary": ["This field is required."],
            "num_affected": ["Must be positive.", "Too large."]
        }
    }"#;
    let error = normalize_error(FetchFailure::http(400, body));

    assert_eq!(error.field("summary"), Some("This field is required."));
    assert_eq!(
        error.field("num_affected"),
        Some("Must be positive. Too large.")
    );
    assert_eq!(error.non_field_message(), None);
    assert_eq!(
        error.message_for_notification,
        "Please check the form for errors"
    );
    assert!(!error.is_retryable());
}

#[test]
fn test_flat_errors_with_non_field_keys() {
    let body = r#"{
        "non_field_errors": ["Dates overlap."],
        "detail": "Appeal is closed.",
        "code": "Duplicate code."
    }"#;
    let error = normalize_error(FetchFailure::http(400, body));

    assert_eq!(error.field("code"), Some("Duplicate code."));
    let merged = error.field(NON_FIELD_ERROR).unwrap_or_default();
    assert!(merged.contains("Dates overlap."));
    assert!(merged.contains("Appeal is closed."));
    assert_eq!(error.message_for_notification, merged);
    assert!(!error.form_errors.contains_key("detail"));
}

#[test]
fn test_detail_only() {
    let error = normalize_error(FetchFailure::http(403, r#"{"detail": "Not allowed."}"#));
    assert_eq!(error.message_for_notification, "Not allowed.");
    assert_eq!(error.status, Some(403));
}

#[test]
fn test_status_default_message() {
    let error = normalize_error(FetchFailure::http(404, "{}"));
    assert!(error.form_errors.is_empty());
    assert_eq!(
        error.message_for_notification,
        "The requested resource was not found"
    );
}

#[test]
fn test_serializes_camel_case() {
    let error = ResponseError::non_field("Boom");
    let json = serde_json::to_value(&error).unwrap();
    assert_eq!(json["messageForNotification"], "Boom");
    assert_eq!(json["formErrors"]["$internal"], "Boom");
    assert!(json.get("status").is_none());
}

// ============================================================================
// Request Lifecycle
// ============================================================================

#[test]
fn test_eager_starts_pending() {
    let request: Request<Vec<u32>> = Request::eager();
    assert_eq!(request.state().table_flags(), (true, None));
    assert_eq!(request.issued(), 1);
}

#[test]
fn test_lazy_waits_for_trigger() {
    let mut request: Request<Vec<u32>> = Request::lazy();
    assert_eq!(request.state(), &RequestState::Idle);
    assert_eq!(request.state().table_flags(), (false, None));
    assert_eq!(request.issued(), 0);

    request.trigger();
    assert!(request.state().is_pending());

    request.resolve(Ok(vec![7]));
    assert_eq!(request.state().data(), Some(&vec![7]));
}

#[test]
fn test_retry_after_failure_has_no_stale_data() {
    let mut request: Request<Vec<u32>> = Request::eager();
    request.resolve_fetch(Err(FetchFailure::http(500, "{}")));
    assert!(request.state().error().is_some());

    request.trigger();
    assert_eq!(request.state(), &RequestState::Pending { previous: None });
}
