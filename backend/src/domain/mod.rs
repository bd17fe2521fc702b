//! Domain primitives, aggregates and services.
//!
//! Purpose: define strongly typed attendance entities used by the HTTP and
//! persistence adapters, plus the services that implement the driving
//! ports. Keep types immutable and document invariants in each type's
//! Rustdoc.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - Course, Student, Lecturer: directory entities.
//! - AttendanceCode, IssuedCode: codes and their validity window.
//! - RedemptionOutcome, EnrollmentOutcome: typed business results.

mod account_service;
pub mod attendance;
pub mod attendance_code;
mod attendance_code_service;
mod attendance_service;
pub mod auth;
pub mod course;
mod directory_service;
pub mod enrollment;
mod enrollment_service;
pub mod error;
pub mod ids;
pub mod lecturer;
pub mod ports;
pub mod roster_seed;
mod store_access;
pub mod student;
pub mod trace_id;

pub use self::account_service::AccountService;
pub use self::attendance::{
    AttendanceEntry, CourseAttendance, NewAttendanceRecord, RedemptionOutcome,
    RedemptionRejection,
};
pub use self::attendance_code::{
    AttendanceCode, AttendanceCodeError, CODE_ALPHABET, CODE_LENGTH, CODE_VALIDITY_MS,
    CodeIssueOutcome, CurrentCodeOutcome, IssuedCode, NewIssuedCode,
};
pub use self::attendance_code_service::AttendanceCodeService;
pub use self::attendance_service::{AttendanceService, RedemptionPolicy};
pub use self::auth::{LoginCredentials, LoginValidationError, Password};
pub use self::course::{COURSE_CODE_MAX_LEN, Course, CourseCode, CourseCodeError, NewCourse};
pub use self::directory_service::DirectoryService;
pub use self::enrollment::{
    CourseStudent, EnrolledCourse, EnrollmentListing, EnrollmentOutcome, EnrollmentRejection,
    StudentEnrollment, UNASSIGNED_LECTURER,
};
pub use self::enrollment_service::EnrollmentService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{CourseId, LecturerId, StudentId};
pub use self::lecturer::{
    ADMIN_USERNAME, Lecturer, LecturerCourses, NewLecturer, Username, UsernameError,
};
pub use self::roster_seed::{RosterSeeder, SeedError, SeedSummary};
pub use self::student::{
    NewStudent, STUDENT_ID_PREFIX, Student, StudentPublicId, StudentPublicIdError,
    next_student_public_id,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use attendance::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
