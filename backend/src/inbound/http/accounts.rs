//! Student and lecturer account handlers.
//!
//! ```text
//! POST /api/student/login {"studentId":"s-001","password":"100-S"}
//! POST /api/student/change-password {"studentId":"S-001","oldPassword":"100-S","newPassword":"pw"}
//! POST /api/lecturer/login {"username":"Nur","password":"password"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::ports::PasswordChangeRequest;
use crate::domain::{Error, LoginCredentials, LoginValidationError, Student};
use crate::inbound::http::courses::CourseDto;
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{ApiResult, MessageResponse};

/// Request body for `POST /api/student/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentLoginRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /api/lecturer/login`.
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LecturerLoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for `POST /api/student/change-password`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub student_id: String,
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

/// Student identity returned after login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentDto {
    /// Store identity, used for enrollment calls.
    pub id: i32,
    pub student_id: String,
    pub name: String,
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self {
            id: student.id.get(),
            student_id: student.public_id.to_string(),
            name: student.name,
        }
    }
}

/// Successful student login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentLoginResponse {
    pub success: bool,
    pub student: StudentDto,
}

/// Lecturer identity and owned courses returned after login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LecturerUserDto {
    pub id: i32,
    pub name: String,
    pub username: String,
    /// Empty for the administrator.
    pub courses: Vec<CourseDto>,
}

/// Successful lecturer login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LecturerLoginResponse {
    pub success: bool,
    pub user: LecturerUserDto,
}

fn map_login_validation_error(err: LoginValidationError, field: &str) -> Error {
    match err {
        LoginValidationError::EmptyIdentifier => {
            Error::invalid_request(format!("{field} must not be empty"))
                .with_details(json!({ "field": field, "code": "empty_identifier" }))
        }
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate a student by public ID and password.
#[utoipa::path(
    post,
    path = "/api/student/login",
    request_body = StudentLoginRequest,
    responses(
        (status = 200, description = "Login result", body = StudentLoginResponse),
        (status = 400, description = "Blank identifier or password", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["accounts"],
    operation_id = "studentLogin"
)]
#[post("/student/login")]
pub async fn student_login(
    state: web::Data<HttpState>,
    payload: web::Json<StudentLoginRequest>,
) -> ApiResult<web::Json<StudentLoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.student_id, &payload.password)
        .map_err(|err| map_login_validation_error(err, "studentId"))?;
    let student = state.accounts.student_login(&credentials).await?;
    Ok(web::Json(StudentLoginResponse {
        success: true,
        student: student.into(),
    }))
}

/// Replace a student's password after checking the old one.
#[utoipa::path(
    post,
    path = "/api/student/change-password",
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Password changed, or refused with success=false", body = MessageResponse),
        (status = 400, description = "New password missing", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["accounts"],
    operation_id = "changeStudentPassword"
)]
#[post("/student/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    payload: web::Json<ChangePasswordRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let ChangePasswordRequest {
        student_id,
        old_password,
        new_password,
    } = payload.into_inner();
    let request = PasswordChangeRequest {
        student_id,
        old_password: Zeroizing::new(old_password),
        new_password: Zeroizing::new(new_password),
    };
    state.accounts.change_student_password(&request).await?;
    Ok(MessageResponse::ok("Password updated successfully!"))
}

/// Authenticate a lecturer or the administrator.
#[utoipa::path(
    post,
    path = "/api/lecturer/login",
    request_body = LecturerLoginRequest,
    responses(
        (status = 200, description = "Login result", body = LecturerLoginResponse),
        (status = 400, description = "Blank username or password", body = ErrorEnvelope),
        (status = 500, description = "Server error", body = ErrorEnvelope)
    ),
    tags = ["accounts"],
    operation_id = "lecturerLogin"
)]
#[post("/lecturer/login")]
pub async fn lecturer_login(
    state: web::Data<HttpState>,
    payload: web::Json<LecturerLoginRequest>,
) -> ApiResult<web::Json<LecturerLoginResponse>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|err| map_login_validation_error(err, "username"))?;
    let account = state.accounts.lecturer_login(&credentials).await?;
    let lecturer = account.lecturer;
    Ok(web::Json(LecturerLoginResponse {
        success: true,
        user: LecturerUserDto {
            id: lecturer.id.get(),
            name: lecturer.name,
            username: lecturer.username.to_string(),
            courses: account.courses.into_iter().map(CourseDto::from).collect(),
        },
    }))
}
