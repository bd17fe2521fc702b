//! Tests for domain error construction and trace capture.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;
use uuid::Uuid;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn conflict() -> Error {
    Error::conflict("You are already enrolled in this course.")
}

#[rstest]
#[case(Error::invalid_request("x"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("x"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("x"), ErrorCode::Forbidden)]
#[case(Error::not_found("x"), ErrorCode::NotFound)]
#[case(Error::conflict("x"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("x"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("x"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(ErrorCode::NotFound, true)]
#[case(ErrorCode::Conflict, true)]
#[case(ErrorCode::InvalidRequest, true)]
#[case(ErrorCode::ServiceUnavailable, false)]
#[case(ErrorCode::InternalError, false)]
fn business_outcomes_exclude_faults(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_business_outcome(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn display_uses_message(conflict: Error) {
    assert_eq!(conflict.to_string(), "You are already enrolled in this course.");
}

#[rstest]
fn builders_attach_trace_and_details(conflict: Error) {
    let error = conflict
        .with_trace_id(TRACE_ID)
        .with_details(json!({ "courseCode": "OSD-001" }));
    assert_eq!(error.trace_id(), Some(TRACE_ID));
    assert_eq!(
        error.details().and_then(|d| d.get("courseCode")),
        Some(&json!("OSD-001"))
    );
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id = TraceId::from_uuid(Uuid::nil());
    let error = TraceId::scope(trace_id, async { Error::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
