//! Course catalogue handlers.
//!
//! ```text
//! GET /api/courses
//! GET /api/course/osd-001
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Course, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Public view of a course.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseDto {
    pub id: i32,
    pub code: String,
    pub name: String,
}

impl From<Course> for CourseDto {
    fn from(course: Course) -> Self {
        Self {
            id: course.id.get(),
            code: course.code.to_string(),
            name: course.name,
        }
    }
}

/// Every course, for the enrollment picker.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CoursesResponse {
    pub success: bool,
    pub courses: Vec<CourseDto>,
}

/// A single course.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CourseResponse {
    pub success: bool,
    pub course: CourseDto,
}

/// List all courses.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Courses", body = CoursesResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "listCourses"
)]
#[get("/courses")]
pub async fn list_courses(state: web::Data<HttpState>) -> ApiResult<web::Json<CoursesResponse>> {
    let courses = state.directory_query.list_courses().await?;
    Ok(web::Json(CoursesResponse {
        success: true,
        courses: courses.into_iter().map(CourseDto::from).collect(),
    }))
}

/// Look up one course by code, case-insensitively.
#[utoipa::path(
    get,
    path = "/api/course/{code}",
    params(("code" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Course, or success=false when unknown", body = CourseResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/course/{code}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    code: web::Path<String>,
) -> ApiResult<web::Json<CourseResponse>> {
    let course = state
        .directory_query
        .find_course(&code)
        .await?
        .ok_or_else(|| Error::not_found("Course not found"))?;
    Ok(web::Json(CourseResponse {
        success: true,
        course: course.into(),
    }))
}
