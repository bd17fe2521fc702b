//! Enrollment handlers for students, lecturers and the administrator.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::ports::EnrollmentRequest;
use crate::domain::{
    CourseId, EnrollmentOutcome, EnrollmentRejection, Error, StudentId, UNASSIGNED_LECTURER,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/student/enroll-course`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollCourseRequest {
    /// Store identity returned by student login, not the `S-NNN` form.
    pub student_db_id: i32,
    pub course_code: String,
}

/// Course summary echoed after a successful enrollment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrolledCourseDto {
    pub code: String,
    pub name: String,
    pub lecturer: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrollCourseResponse {
    pub success: bool,
    pub message: String,
    pub enrolled_course: EnrolledCourseDto,
}

/// A course in a student's enrollment list.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentEnrollmentDto {
    pub code: String,
    pub name: String,
    pub lecturer_name: String,
    pub course_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentEnrollmentsResponse {
    pub success: bool,
    pub enrollments: Vec<StudentEnrollmentDto>,
}

/// A student enrolled in a lecturer's course.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrolledStudentDto {
    pub student_id: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrolledStudentsResponse {
    pub success: bool,
    pub students: Vec<EnrolledStudentDto>,
}

/// One line of the administrator's enrollment overview.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnrollmentListingDto {
    pub student_id: String,
    #[serde(rename = "studentName")]
    pub student_name: String,
    #[serde(rename = "courseCode")]
    pub course_code: String,
    #[serde(rename = "courseName")]
    pub course_name: String,
    #[serde(rename = "lecturerName")]
    pub lecturer_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AllEnrollmentsResponse {
    pub success: bool,
    pub enrollments: Vec<EnrollmentListingDto>,
}

fn lecturer_or_unassigned(name: Option<String>) -> String {
    name.unwrap_or_else(|| UNASSIGNED_LECTURER.to_owned())
}

fn rejection_error(rejection: EnrollmentRejection) -> Error {
    let message = rejection.message();
    match rejection {
        EnrollmentRejection::StudentNotFound => Error::not_found(message)
            .with_details(json!({ "reason": "student_not_found" })),
        EnrollmentRejection::CourseNotFound => {
            Error::not_found(message).with_details(json!({ "reason": "course_not_found" }))
        }
        EnrollmentRejection::AlreadyEnrolled => {
            Error::conflict(message).with_details(json!({ "reason": "already_enrolled" }))
        }
    }
}

/// Enroll a student in a course by code.
#[utoipa::path(
    post,
    path = "/api/student/enroll-course",
    request_body = EnrollCourseRequest,
    responses(
        (status = 200, description = "Enrolled, or refused with success=false", body = EnrollCourseResponse),
        (status = 400, description = "Malformed request", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["enrollment"],
    operation_id = "enrollCourse"
)]
#[post("/student/enroll-course")]
pub async fn enroll_course(
    state: web::Data<HttpState>,
    payload: web::Json<EnrollCourseRequest>,
) -> ApiResult<web::Json<EnrollCourseResponse>> {
    let EnrollCourseRequest {
        student_db_id,
        course_code,
    } = payload.into_inner();
    let request = EnrollmentRequest {
        student_id: StudentId::new(student_db_id),
        course_code,
    };
    let outcome = state.enrollment.enroll(&request).await?;
    let message = outcome.message();
    match outcome {
        EnrollmentOutcome::Enrolled(course) => Ok(web::Json(EnrollCourseResponse {
            success: true,
            message,
            enrolled_course: EnrolledCourseDto {
                code: course.code.to_string(),
                lecturer: course.lecturer_display().to_owned(),
                name: course.name,
            },
        })),
        EnrollmentOutcome::Rejected(rejection) => Err(rejection_error(rejection)),
    }
}

/// Courses a student is enrolled in, ordered by course code.
#[utoipa::path(
    get,
    path = "/api/student/enrollments/{studentDbId}",
    params(("studentDbId" = i32, Path, description = "Student store identity")),
    responses(
        (status = 200, description = "Enrollments", body = StudentEnrollmentsResponse),
        (status = 400, description = "Non-numeric identity", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["enrollment"],
    operation_id = "studentEnrollments"
)]
#[get("/student/enrollments/{student_db_id}")]
pub async fn student_enrollments(
    state: web::Data<HttpState>,
    student_db_id: web::Path<i32>,
) -> ApiResult<web::Json<StudentEnrollmentsResponse>> {
    let student = StudentId::new(student_db_id.into_inner());
    let enrollments = state
        .enrollment_query
        .student_enrollments(student)
        .await?
        .into_iter()
        .map(|enrollment| StudentEnrollmentDto {
            code: enrollment.code.to_string(),
            name: enrollment.name,
            lecturer_name: lecturer_or_unassigned(enrollment.lecturer_name),
            course_id: enrollment.course_id.get(),
        })
        .collect();
    Ok(web::Json(StudentEnrollmentsResponse {
        success: true,
        enrollments,
    }))
}

/// Students enrolled in a course, ordered by name.
#[utoipa::path(
    get,
    path = "/api/lecturer/enrolled-students/{courseId}",
    params(("courseId" = i32, Path, description = "Course store identity")),
    responses(
        (status = 200, description = "Enrolled students", body = EnrolledStudentsResponse),
        (status = 400, description = "Non-numeric identity", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["lecturer"],
    operation_id = "enrolledStudents"
)]
#[get("/lecturer/enrolled-students/{course_id}")]
pub async fn enrolled_students(
    state: web::Data<HttpState>,
    course_id: web::Path<i32>,
) -> ApiResult<web::Json<EnrolledStudentsResponse>> {
    let course = CourseId::new(course_id.into_inner());
    let students = state
        .enrollment_query
        .course_students(course)
        .await?
        .into_iter()
        .map(|student| EnrolledStudentDto {
            student_id: student.public_id.to_string(),
            student_name: student.name,
        })
        .collect();
    Ok(web::Json(EnrolledStudentsResponse {
        success: true,
        students,
    }))
}

/// Every enrollment, ordered by course code then student name.
#[utoipa::path(
    get,
    path = "/api/admin/all-enrollments",
    responses(
        (status = 200, description = "All enrollments", body = AllEnrollmentsResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "allEnrollments"
)]
#[get("/admin/all-enrollments")]
pub async fn all_enrollments(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AllEnrollmentsResponse>> {
    let enrollments = state
        .enrollment_query
        .all_enrollments()
        .await?
        .into_iter()
        .map(|listing| EnrollmentListingDto {
            student_id: listing.public_id.to_string(),
            student_name: listing.student_name,
            course_code: listing.course_code.to_string(),
            course_name: listing.course_name,
            lecturer_name: lecturer_or_unassigned(listing.lecturer_name),
        })
        .collect();
    Ok(web::Json(AllEnrollmentsResponse {
        success: true,
        enrollments,
    }))
}
