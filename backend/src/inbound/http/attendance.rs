//! Attendance redemption and reporting handlers.
//!
//! ```text
//! POST /api/attendance {"studentId":"S-001","courseCode":"OSD-001","attendanceCode":"AB12CD"}
//! GET  /api/lecturer/attendance/OSD-001
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::RedemptionRequest;
use crate::domain::{Error, RedemptionOutcome, RedemptionRejection};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageResponse};

/// Request body for `POST /api/attendance`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAttendanceRequest {
    /// Public student identifier, e.g. `S-001`.
    pub student_id: String,
    pub course_code: String,
    pub attendance_code: String,
}

/// One attendance line; `timestamp` is epoch milliseconds.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecordDto {
    pub student_name: String,
    pub timestamp: i64,
}

/// Course identity echoed by the attendance report.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportCourseDto {
    pub code: String,
    pub name: String,
}

/// Attendance report for one course, newest first.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceReportResponse {
    pub success: bool,
    pub records: Vec<AttendanceRecordDto>,
    pub course: ReportCourseDto,
}

const fn rejection_reason(rejection: RedemptionRejection) -> &'static str {
    match rejection {
        RedemptionRejection::CourseNotFound => "course_not_found",
        RedemptionRejection::StudentNotFound => "student_not_found",
        RedemptionRejection::NotEnrolled => "not_enrolled",
        RedemptionRejection::NoCodeIssued | RedemptionRejection::InvalidCode => "invalid_code",
        RedemptionRejection::CodeExpired => "code_expired",
        RedemptionRejection::AlreadyRecorded => "already_recorded",
    }
}

fn rejection_error(rejection: RedemptionRejection) -> Error {
    let message = rejection.message();
    let error = match rejection {
        RedemptionRejection::CourseNotFound | RedemptionRejection::StudentNotFound => {
            Error::not_found(message)
        }
        RedemptionRejection::NotEnrolled => Error::forbidden(message),
        RedemptionRejection::NoCodeIssued
        | RedemptionRejection::InvalidCode
        | RedemptionRejection::CodeExpired => Error::unauthorized(message),
        RedemptionRejection::AlreadyRecorded => Error::conflict(message),
    };
    error.with_details(json!({ "reason": rejection_reason(rejection) }))
}

/// Redeem an attendance code for a student.
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = SubmitAttendanceRequest,
    responses(
        (status = 200, description = "Attendance recorded, or refused with success=false", body = MessageResponse),
        (status = 400, description = "Malformed request", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["attendance"],
    operation_id = "submitAttendance"
)]
#[post("/attendance")]
pub async fn submit_attendance(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitAttendanceRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let SubmitAttendanceRequest {
        student_id,
        course_code,
        attendance_code,
    } = payload.into_inner();
    let request = RedemptionRequest {
        student_id,
        course_code,
        submitted_code: attendance_code,
    };
    let outcome = state.attendance.redeem(&request).await?;
    match outcome {
        RedemptionOutcome::Accepted { .. } => Ok(MessageResponse::ok(outcome.message())),
        RedemptionOutcome::Rejected(rejection) => Err(rejection_error(rejection)),
    }
}

/// List a course's attendance records, newest first.
#[utoipa::path(
    get,
    path = "/api/lecturer/attendance/{courseCode}",
    params(("courseCode" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Attendance report, or success=false for an unknown course", body = AttendanceReportResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "courseAttendance"
)]
#[get("/lecturer/attendance/{course_code}")]
pub async fn course_attendance(
    state: web::Data<HttpState>,
    course_code: web::Path<String>,
) -> ApiResult<web::Json<AttendanceReportResponse>> {
    let report = state
        .attendance_query
        .course_attendance(&course_code)
        .await?
        .ok_or_else(|| Error::not_found("Course not found"))?;
    let records = report
        .entries
        .into_iter()
        .map(|entry| AttendanceRecordDto {
            student_name: entry.student_name,
            timestamp: entry.recorded_at.timestamp_millis(),
        })
        .collect();
    Ok(web::Json(AttendanceReportResponse {
        success: true,
        records,
        course: ReportCourseDto {
            code: report.course.code.to_string(),
            name: report.course.name,
        },
    }))
}
