//! Port for course persistence, including the course cascade delete.

use async_trait::async_trait;

use crate::domain::{Course, CourseCode, CourseId, LecturerId, NewCourse};

use super::{InsertOutcome, RecordStoreError};

/// Port for reading and mutating courses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Every course, ordered by store identity.
    async fn list_all(&self) -> Result<Vec<Course>, RecordStoreError>;

    /// Find a course by its code.
    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<Course>, RecordStoreError>;

    /// Find a course by store identity.
    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError>;

    /// Courses owned by `lecturer`, ordered by code.
    async fn list_for_lecturer(
        &self,
        lecturer: LecturerId,
    ) -> Result<Vec<Course>, RecordStoreError>;

    /// Create a course unless one with the same code exists.
    async fn create(&self, course: &NewCourse) -> Result<InsertOutcome<Course>, RecordStoreError>;

    /// Reassign ownership. Returns `false` when the course does not exist.
    async fn assign_lecturer(
        &self,
        course: CourseId,
        lecturer: LecturerId,
    ) -> Result<bool, RecordStoreError>;

    /// Delete the course with its codes, attendance records and enrollments
    /// in one transaction. Returns `false` when the course does not exist.
    async fn delete_cascade(&self, course: CourseId) -> Result<bool, RecordStoreError>;
}
