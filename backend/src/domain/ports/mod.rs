//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CodeGenerator`], [`CredentialVerifier`])
//! are implemented by outbound adapters. Driving ports (`*Command`,
//! `*Query`) are implemented by domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod attendance_code_command;
mod attendance_code_repository;
mod attendance_command;
mod attendance_record_repository;
mod code_generator;
mod course_repository;
mod credential_verifier;
mod directory_command;
mod directory_query;
mod enrollment_command;
mod enrollment_repository;
mod lecturer_repository;
mod record_store;
mod student_repository;

#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_command::{AccountCommand, PasswordChangeRequest};
#[cfg(test)]
pub use attendance_code_command::{MockAttendanceCodeCommand, MockAttendanceCodeQuery};
pub use attendance_code_command::{AttendanceCodeCommand, AttendanceCodeQuery, IssueCodeRequest};
pub use attendance_code_repository::AttendanceCodeRepository;
#[cfg(test)]
pub use attendance_code_repository::MockAttendanceCodeRepository;
pub use attendance_command::{AttendanceCommand, AttendanceQuery, RedemptionRequest};
#[cfg(test)]
pub use attendance_command::{MockAttendanceCommand, MockAttendanceQuery};
pub use attendance_record_repository::AttendanceRecordRepository;
#[cfg(test)]
pub use attendance_record_repository::MockAttendanceRecordRepository;
#[cfg(test)]
pub use code_generator::MockCodeGenerator;
pub use code_generator::{CodeGenerator, SequenceCodeGenerator};
pub use course_repository::CourseRepository;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
#[cfg(test)]
pub use credential_verifier::MockCredentialVerifier;
pub use credential_verifier::{CredentialVerifier, PlaintextCredentialVerifier};
#[cfg(test)]
pub use directory_command::MockDirectoryCommand;
pub use directory_command::{
    CreatedStudent, DirectoryCommand, NewCourseRequest, NewLecturerRequest,
};
pub use directory_query::DirectoryQuery;
#[cfg(test)]
pub use directory_query::MockDirectoryQuery;
#[cfg(test)]
pub use enrollment_command::{MockEnrollmentCommand, MockEnrollmentQuery};
pub use enrollment_command::{EnrollmentCommand, EnrollmentQuery, EnrollmentRequest};
pub use enrollment_repository::EnrollmentRepository;
#[cfg(test)]
pub use enrollment_repository::MockEnrollmentRepository;
pub use lecturer_repository::LecturerRepository;
#[cfg(test)]
pub use lecturer_repository::MockLecturerRepository;
pub use record_store::{InsertOutcome, RecordStoreError, StorePorts};
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::StudentRepository;
