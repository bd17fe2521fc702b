//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every `/api` route, the health probes, and the
//! request/response schemas. Swagger UI serves it in debug builds and
//! `cargo run --bin openapi-dump` exports it for external tooling.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::MessageResponse;
use crate::inbound::http::accounts::{
    ChangePasswordRequest, LecturerLoginRequest, LecturerLoginResponse, LecturerUserDto,
    StudentDto, StudentLoginRequest, StudentLoginResponse,
};
use crate::inbound::http::admin::{
    AddCourseRequest, AddLecturerRequest, AddStudentRequest, AdminStudentDto,
    AdminStudentsResponse, AssignLecturerRequest, LecturerCourseDto, LecturerWithCoursesDto,
    LecturersCoursesResponse, RenameStudentRequest,
};
use crate::inbound::http::attendance::{
    AttendanceRecordDto, AttendanceReportResponse, ReportCourseDto, SubmitAttendanceRequest,
};
use crate::inbound::http::codes::{CurrentCodeResponse, GenerateCodeRequest, GenerateCodeResponse};
use crate::inbound::http::courses::{CourseDto, CourseResponse, CoursesResponse};
use crate::inbound::http::enrollment::{
    AllEnrollmentsResponse, EnrollCourseRequest, EnrollCourseResponse, EnrolledCourseDto,
    EnrolledStudentDto, EnrolledStudentsResponse, EnrollmentListingDto, StudentEnrollmentDto,
    StudentEnrollmentsResponse,
};
use crate::inbound::http::error::ErrorEnvelope;
use crate::inbound::http::health::{ReadinessReport, StoreBackend};

/// OpenAPI document for the attendance API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Classroom attendance API",
        description = "Attendance codes, redemption, enrollment and the admin directory. \
            Business refusals answer HTTP 200 with success=false."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::courses::list_courses,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::codes::generate_code,
        crate::inbound::http::codes::current_code,
        crate::inbound::http::attendance::submit_attendance,
        crate::inbound::http::attendance::course_attendance,
        crate::inbound::http::accounts::student_login,
        crate::inbound::http::accounts::change_password,
        crate::inbound::http::accounts::lecturer_login,
        crate::inbound::http::enrollment::enroll_course,
        crate::inbound::http::enrollment::student_enrollments,
        crate::inbound::http::enrollment::enrolled_students,
        crate::inbound::http::enrollment::all_enrollments,
        crate::inbound::http::admin::list_students,
        crate::inbound::http::admin::lecturers_courses,
        crate::inbound::http::admin::add_student,
        crate::inbound::http::admin::rename_student,
        crate::inbound::http::admin::delete_student,
        crate::inbound::http::admin::add_lecturer,
        crate::inbound::http::admin::delete_lecturer,
        crate::inbound::http::admin::add_course,
        crate::inbound::http::admin::assign_lecturer,
        crate::inbound::http::admin::delete_course,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorEnvelope,
        ErrorCode,
        MessageResponse,
        CourseDto,
        CoursesResponse,
        CourseResponse,
        GenerateCodeRequest,
        GenerateCodeResponse,
        CurrentCodeResponse,
        SubmitAttendanceRequest,
        AttendanceRecordDto,
        ReportCourseDto,
        AttendanceReportResponse,
        StudentLoginRequest,
        StudentLoginResponse,
        StudentDto,
        ChangePasswordRequest,
        LecturerLoginRequest,
        LecturerLoginResponse,
        LecturerUserDto,
        EnrollCourseRequest,
        EnrollCourseResponse,
        EnrolledCourseDto,
        StudentEnrollmentDto,
        StudentEnrollmentsResponse,
        EnrolledStudentDto,
        EnrolledStudentsResponse,
        EnrollmentListingDto,
        AllEnrollmentsResponse,
        AdminStudentDto,
        AdminStudentsResponse,
        LecturerCourseDto,
        LecturerWithCoursesDto,
        LecturersCoursesResponse,
        AddStudentRequest,
        RenameStudentRequest,
        AddLecturerRequest,
        AddCourseRequest,
        AssignLecturerRequest,
        ReadinessReport,
        StoreBackend,
    )),
    tags(
        (name = "courses", description = "Course catalogue"),
        (name = "lecturer", description = "Code issuance and course reports"),
        (name = "attendance", description = "Attendance redemption"),
        (name = "accounts", description = "Student and lecturer sign-in"),
        (name = "enrollment", description = "Student enrollment"),
        (name = "admin", description = "Directory administration"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
