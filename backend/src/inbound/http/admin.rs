//! Administrator handlers for the student, lecturer and course directory.
//!
//! Text fields default to empty so that a missing field reaches the
//! directory service and comes back with its own validation message.

use actix_web::{delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::{NewCourseRequest, NewLecturerRequest};
use crate::domain::{Error, LecturerId, Student, StudentId};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageResponse};

/// A student row in the admin listing.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminStudentDto {
    pub id: i32,
    pub student_id: String,
    pub name: String,
}

impl From<Student> for AdminStudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.get(),
            student_id: student.public_id.to_string(),
            name: student.name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AdminStudentsResponse {
    pub success: bool,
    pub students: Vec<AdminStudentDto>,
}

/// A course owned by a listed lecturer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LecturerCourseDto {
    pub course_db_id: i32,
    pub code: String,
    pub course_name: String,
}

/// A lecturer with the courses they own.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LecturerWithCoursesDto {
    pub id: i32,
    pub name: String,
    pub username: String,
    pub courses: Vec<LecturerCourseDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LecturersCoursesResponse {
    pub success: bool,
    pub lecturers: Vec<LecturerWithCoursesDto>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddStudentRequest {
    pub student_name: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RenameStudentRequest {
    pub new_name: String,
}

#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(default)]
pub struct AddLecturerRequest {
    pub username: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AddCourseRequest {
    pub course_code: String,
    pub course_name: String,
    /// Initial owner; the course is unassigned when absent.
    pub lecturer_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignLecturerRequest {
    pub new_lecturer_id: Option<i32>,
}

/// Every student, ordered by public identifier.
#[utoipa::path(
    get,
    path = "/api/admin/students",
    responses(
        (status = 200, description = "Students", body = AdminStudentsResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "listStudents"
)]
#[get("/admin/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<AdminStudentsResponse>> {
    let students = state.directory_query.list_students().await?;
    Ok(web::Json(AdminStudentsResponse {
        success: true,
        students: students.into_iter().map(AdminStudentDto::from).collect(),
    }))
}

/// Every lecturer except the administrator, with owned courses.
#[utoipa::path(
    get,
    path = "/api/admin/lecturers-courses",
    responses(
        (status = 200, description = "Lecturers and their courses", body = LecturersCoursesResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "lecturersCourses"
)]
#[get("/admin/lecturers-courses")]
pub async fn lecturers_courses(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<LecturersCoursesResponse>> {
    let lecturers = state
        .directory_query
        .list_lecturers_with_courses()
        .await?
        .into_iter()
        .map(|entry| LecturerWithCoursesDto {
            id: entry.lecturer.id.get(),
            name: entry.lecturer.name,
            username: entry.lecturer.username.to_string(),
            courses: entry
                .courses
                .into_iter()
                .map(|course| LecturerCourseDto {
                    course_db_id: course.id.get(),
                    code: course.code.to_string(),
                    course_name: course.name,
                })
                .collect(),
        })
        .collect();
    Ok(web::Json(LecturersCoursesResponse {
        success: true,
        lecturers,
    }))
}

/// Create a student with the next `S-NNN` identifier.
#[utoipa::path(
    post,
    path = "/api/admin/add-student",
    request_body = AddStudentRequest,
    responses(
        (status = 200, description = "Student created, or refused with success=false", body = MessageResponse),
        (status = 400, description = "Name missing", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "addStudent"
)]
#[post("/admin/add-student")]
pub async fn add_student(
    state: web::Data<HttpState>,
    payload: web::Json<AddStudentRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let created = state.directory.add_student(&payload.student_name).await?;
    Ok(MessageResponse::ok(format!(
        "Student '{}' added successfully with ID: {} and password: {}.",
        created.student.name,
        created.student.public_id,
        created.initial_password.as_str()
    )))
}

/// Rename a student by store identity.
#[utoipa::path(
    put,
    path = "/api/admin/student/{id}",
    params(("id" = i32, Path, description = "Student store identity")),
    request_body = RenameStudentRequest,
    responses(
        (status = 200, description = "Renamed, or refused with success=false", body = MessageResponse),
        (status = 400, description = "New name missing", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "renameStudent"
)]
#[put("/admin/student/{id}")]
pub async fn rename_student(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
    payload: web::Json<RenameStudentRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let student = StudentId::new(id.into_inner());
    state
        .directory
        .rename_student(student, &payload.new_name)
        .await?;
    Ok(MessageResponse::ok("Student name updated successfully."))
}

/// Delete a student by public identifier, with enrollments and records.
#[utoipa::path(
    delete,
    path = "/api/admin/student/{studentId}",
    params(("studentId" = String, Path, description = "Public student identifier")),
    responses(
        (status = 200, description = "Deleted, or refused with success=false", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "deleteStudent"
)]
#[delete("/admin/student/{student_id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    student_id: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let deleted = state.directory.delete_student(&student_id).await?;
    Ok(MessageResponse::ok(format!(
        "Student {deleted} and all related records deleted successfully."
    )))
}

/// Create a lecturer account.
#[utoipa::path(
    post,
    path = "/api/admin/add-lecturer",
    request_body = AddLecturerRequest,
    responses(
        (status = 200, description = "Lecturer created, or refused with success=false", body = MessageResponse),
        (status = 400, description = "Fields missing", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "addLecturer"
)]
#[post("/admin/add-lecturer")]
pub async fn add_lecturer(
    state: web::Data<HttpState>,
    payload: web::Json<AddLecturerRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let AddLecturerRequest {
        username,
        password,
        name,
    } = payload.into_inner();
    let request = NewLecturerRequest {
        username,
        password: Zeroizing::new(password),
        name,
    };
    let lecturer = state.directory.add_lecturer(&request).await?;
    Ok(MessageResponse::ok(format!(
        "Lecturer '{}' added successfully with username '{}'.",
        lecturer.name, lecturer.username
    )))
}

/// Delete a lecturer with their courses and those courses' records.
#[utoipa::path(
    delete,
    path = "/api/admin/lecturer/{id}",
    params(("id" = i32, Path, description = "Lecturer store identity")),
    responses(
        (status = 200, description = "Deleted, or refused with success=false", body = MessageResponse),
        (status = 400, description = "Non-numeric identity", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "deleteLecturer"
)]
#[delete("/admin/lecturer/{id}")]
pub async fn delete_lecturer(
    state: web::Data<HttpState>,
    id: web::Path<i32>,
) -> ApiResult<web::Json<MessageResponse>> {
    let lecturer = LecturerId::new(id.into_inner());
    state.directory.delete_lecturer(lecturer).await?;
    Ok(MessageResponse::ok(
        "Lecturer and associated courses/records deleted successfully.",
    ))
}

/// Create a course, optionally owned by a lecturer.
#[utoipa::path(
    post,
    path = "/api/admin/add-course",
    request_body = AddCourseRequest,
    responses(
        (status = 200, description = "Course created, or refused with success=false", body = MessageResponse),
        (status = 400, description = "Code or name missing or malformed", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "addCourse"
)]
#[post("/admin/add-course")]
pub async fn add_course(
    state: web::Data<HttpState>,
    payload: web::Json<AddCourseRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let AddCourseRequest {
        course_code,
        course_name,
        lecturer_id,
    } = payload.into_inner();
    let request = NewCourseRequest {
        code: course_code,
        name: course_name,
        lecturer_id: lecturer_id.map(LecturerId::new),
    };
    let course = state.directory.add_course(&request).await?;
    Ok(MessageResponse::ok(format!(
        "Course {} created successfully.",
        course.code
    )))
}

/// Hand a course to another lecturer.
#[utoipa::path(
    put,
    path = "/api/admin/course/{courseCode}/assign-lecturer",
    params(("courseCode" = String, Path, description = "Course code")),
    request_body = AssignLecturerRequest,
    responses(
        (status = 200, description = "Reassigned, or refused with success=false", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "assignLecturer"
)]
#[put("/admin/course/{course_code}/assign-lecturer")]
pub async fn assign_lecturer(
    state: web::Data<HttpState>,
    course_code: web::Path<String>,
    payload: web::Json<AssignLecturerRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let lecturer = payload
        .new_lecturer_id
        .map(LecturerId::new)
        .ok_or_else(|| Error::not_found("New lecturer not found."))?;
    let code = state
        .directory
        .assign_lecturer(&course_code, lecturer)
        .await?;
    Ok(MessageResponse::ok(format!(
        "Course {code} successfully assigned to new lecturer."
    )))
}

/// Delete a course with its codes, enrollments and records.
#[utoipa::path(
    delete,
    path = "/api/admin/course/{courseCode}",
    params(("courseCode" = String, Path, description = "Course code")),
    responses(
        (status = 200, description = "Deleted, or refused with success=false", body = MessageResponse),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["admin"],
    operation_id = "deleteCourse"
)]
#[delete("/admin/course/{course_code}")]
pub async fn delete_course(
    state: web::Data<HttpState>,
    course_code: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let code = state.directory.delete_course(&course_code).await?;
    Ok(MessageResponse::ok(format!(
        "Course {code} and all related records deleted successfully."
    )))
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
