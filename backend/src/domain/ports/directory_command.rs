//! Driving port for admin mutations of the student, lecturer and course
//! directory.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{
    Course, CourseCode, Error, Lecturer, LecturerId, Student, StudentId, StudentPublicId,
};

/// A student created by the admin, with the password handed out to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedStudent {
    /// The stored student.
    pub student: Student,
    /// Initial password in the clear, for the confirmation message.
    pub initial_password: Zeroizing<String>,
}

/// Request to create a lecturer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecturerRequest {
    /// Raw username; stored lower-case.
    pub username: String,
    /// Initial password.
    pub password: Zeroizing<String>,
    /// Display name.
    pub name: String,
}

/// Request to create a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourseRequest {
    /// Raw course code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Initial owner, if any.
    pub lecturer_id: Option<LecturerId>,
}

/// Admin operations that change the directory.
///
/// Expected refusals come back as `Err` with a not-found, conflict,
/// forbidden or invalid-request code and a user-facing message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryCommand: Send + Sync {
    /// Create a student with the next `S-NNN` identifier and the reversed
    /// identifier as password.
    async fn add_student(&self, name: &str) -> Result<CreatedStudent, Error>;

    /// Rename a student.
    async fn rename_student(&self, student: StudentId, new_name: &str) -> Result<(), Error>;

    /// Delete a student by public identifier, with their records.
    async fn delete_student(&self, public_id: &str) -> Result<StudentPublicId, Error>;

    /// Create a lecturer account.
    async fn add_lecturer(&self, request: &NewLecturerRequest) -> Result<Lecturer, Error>;

    /// Delete a lecturer with their courses and those courses' records.
    async fn delete_lecturer(&self, lecturer: LecturerId) -> Result<(), Error>;

    /// Create a course.
    async fn add_course(&self, request: &NewCourseRequest) -> Result<Course, Error>;

    /// Hand a course to another lecturer.
    async fn assign_lecturer(
        &self,
        course_code: &str,
        lecturer: LecturerId,
    ) -> Result<CourseCode, Error>;

    /// Delete a course with its codes, records and enrollments.
    async fn delete_course(&self, course_code: &str) -> Result<CourseCode, Error>;
}
