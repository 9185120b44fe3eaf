//! Tests for the domain error payload.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture trace id is a UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::conflict("again"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "  \t ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn trace_id_is_absent_outside_a_request() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructors_capture_the_scoped_trace_id(trace_id: TraceId) {
    let error = TraceId::scope(trace_id, async { Error::forbidden("nope") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn serialises_details_and_trace_id() {
    let error = Error::invalid_request("bad")
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "field": "email" }));
    let value = serde_json::to_value(error).expect("serialise");
    assert_eq!(value["traceId"], TRACE_ID);
    assert_eq!(value["details"]["field"], "email");
}

#[rstest]
fn deserialising_a_blank_message_fails() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "internal_error", "message": " " }));
    assert!(result.is_err());
}

#[rstest]
#[tokio::test]
async fn deserialising_keeps_the_payload_trace_id(trace_id: TraceId) {
    let payload = json!({
        "code": "conflict",
        "message": "duplicate",
        "traceId": "11111111-1111-1111-1111-111111111111",
    });
    let error: Error = TraceId::scope(trace_id, async move {
        serde_json::from_value(payload).expect("valid payload")
    })
    .await;
    assert_eq!(error.trace_id(), Some("11111111-1111-1111-1111-111111111111"));
}
