//! Port for enrollment pairs and the listings joined from them.

use async_trait::async_trait;

use crate::domain::{CourseId, CourseStudent, EnrollmentListing, StudentEnrollment, StudentId};

use super::{InsertOutcome, RecordStoreError};

/// Port for reading and writing (student, course) enrollment pairs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// Insert the pair unless it already exists.
    async fn insert_if_absent(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<InsertOutcome<()>, RecordStoreError>;

    /// Whether the pair exists.
    async fn exists(&self, student: StudentId, course: CourseId)
    -> Result<bool, RecordStoreError>;

    /// Courses the student is enrolled in, with owner names.
    async fn list_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<StudentEnrollment>, RecordStoreError>;

    /// Students enrolled in the course, ordered by display name.
    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<CourseStudent>, RecordStoreError>;

    /// Every enrollment, ordered by course code then student name.
    async fn list_all(&self) -> Result<Vec<EnrollmentListing>, RecordStoreError>;
}
