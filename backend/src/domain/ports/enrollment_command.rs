//! Driving ports for student enrollment and enrollment listings.

use async_trait::async_trait;

use crate::domain::{
    CourseId, CourseStudent, EnrollmentListing, EnrollmentOutcome, Error, StudentEnrollment,
    StudentId,
};

/// A student's request to join a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentRequest {
    /// Store identity of the student.
    pub student_id: StudentId,
    /// Raw course code.
    pub course_code: String,
}

/// Enrolls students in courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentCommand: Send + Sync {
    /// Enroll the student. Refusals are reported in the outcome.
    async fn enroll(&self, request: &EnrollmentRequest) -> Result<EnrollmentOutcome, Error>;
}

/// Reads enrollment listings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentQuery: Send + Sync {
    /// Courses a student is enrolled in.
    async fn student_enrollments(&self, student: StudentId)
    -> Result<Vec<StudentEnrollment>, Error>;

    /// Students enrolled in a course, ordered by name.
    async fn course_students(&self, course: CourseId) -> Result<Vec<CourseStudent>, Error>;

    /// Every enrollment, ordered by course code then student name.
    async fn all_enrollments(&self) -> Result<Vec<EnrollmentListing>, Error>;
}
