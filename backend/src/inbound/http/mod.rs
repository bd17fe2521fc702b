//! HTTP inbound adapter exposing the `/api` JSON routes.
//!
//! Successful responses carry `success: true` plus a route-specific payload;
//! failures use the envelope rendered by [`error`].

pub mod accounts;
pub mod admin;
pub mod attendance;
pub mod codes;
pub mod courses;
pub mod enrollment;
pub mod error;
pub mod health;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;
use serde_json::json;

use crate::domain::Error;

pub use error::ApiResult;

/// Shared success payload for routes that only report a message.
#[derive(Debug, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    /// Successful response carrying `message`.
    pub fn ok(message: impl Into<String>) -> web::Json<Self> {
        web::Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Register every `/api` route and the JSON/path extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use attendance::inbound::http::configure;
///
/// let _app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::PathConfig::default().error_handler(|err, _req| {
            Error::invalid_request("Invalid path parameter.")
                .with_details(json!({ "reason": err.to_string() }))
                .into()
        }))
        .service(courses::list_courses)
        .service(courses::get_course)
        .service(attendance::submit_attendance)
        .service(attendance::course_attendance)
        .service(accounts::student_login)
        .service(accounts::change_password)
        .service(accounts::lecturer_login)
        .service(enrollment::enroll_course)
        .service(enrollment::student_enrollments)
        .service(enrollment::enrolled_students)
        .service(enrollment::all_enrollments)
        .service(codes::generate_code)
        .service(codes::current_code)
        .service(admin::list_students)
        .service(admin::lecturers_courses)
        .service(admin::add_student)
        .service(admin::rename_student)
        .service(admin::delete_student)
        .service(admin::add_lecturer)
        .service(admin::delete_lecturer)
        .service(admin::add_course)
        .service(admin::assign_lecturer)
        .service(admin::delete_course);
}
