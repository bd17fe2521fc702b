//! Lecturer attendance code handlers.
//!
//! ```text
//! POST /api/lecturer/generate-code {"courseCode":"OSD-001","lecturerId":1}
//! GET  /api/lecturer/current-code/OSD-001
//! ```

use actix_web::{get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::IssueCodeRequest;
use crate::domain::{CodeIssueOutcome, CurrentCodeOutcome, Error, LecturerId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/lecturer/generate-code`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateCodeRequest {
    pub course_code: String,
    pub lecturer_id: i32,
}

/// A freshly issued code.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateCodeResponse {
    pub success: bool,
    pub code: String,
}

/// The course's current code and its issue instant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CurrentCodeResponse {
    pub success: bool,
    pub code: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
}

/// Issue a new attendance code for a course the lecturer owns.
#[utoipa::path(
    post,
    path = "/api/lecturer/generate-code",
    request_body = GenerateCodeRequest,
    responses(
        (status = 200, description = "Code issued, or refused with success=false", body = GenerateCodeResponse),
        (status = 400, description = "Malformed request", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "generateCode"
)]
#[post("/lecturer/generate-code")]
pub async fn generate_code(
    state: web::Data<HttpState>,
    payload: web::Json<GenerateCodeRequest>,
) -> ApiResult<web::Json<GenerateCodeResponse>> {
    let GenerateCodeRequest {
        course_code,
        lecturer_id,
    } = payload.into_inner();
    let request = IssueCodeRequest {
        course_code,
        lecturer_id: LecturerId::new(lecturer_id),
    };
    match state.codes.issue_code(&request).await? {
        CodeIssueOutcome::Issued(issued) => Ok(web::Json(GenerateCodeResponse {
            success: true,
            code: issued.code.to_string(),
        })),
        CodeIssueOutcome::Unauthorized => {
            Err(Error::unauthorized(CodeIssueOutcome::UNAUTHORIZED_MESSAGE))
        }
    }
}

/// Fetch the code currently accepted for a course.
#[utoipa::path(
    get,
    path = "/api/lecturer/current-code/{courseCode}",
    params(("courseCode" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Active code, or success=false when none", body = CurrentCodeResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "currentCode"
)]
#[get("/lecturer/current-code/{course_code}")]
pub async fn current_code(
    state: web::Data<HttpState>,
    course_code: web::Path<String>,
) -> ApiResult<web::Json<CurrentCodeResponse>> {
    let outcome = state.codes_query.current_code(&course_code).await?;
    match outcome {
        CurrentCodeOutcome::Active(issued) => Ok(web::Json(CurrentCodeResponse {
            success: true,
            code: issued.code.to_string(),
            timestamp: issued.issued_at,
        })),
        CurrentCodeOutcome::NoActiveCode => Err(Error::not_found("No active code")),
        CurrentCodeOutcome::CourseNotFound => Err(Error::not_found("Course not found")),
    }
}
