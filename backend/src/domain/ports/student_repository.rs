//! Port for student persistence, including the student cascade delete.

use async_trait::async_trait;

use crate::domain::{NewStudent, Password, Student, StudentId, StudentPublicId};

use super::{InsertOutcome, RecordStoreError};

/// Port for reading and mutating students.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Every student, ordered by public identifier.
    async fn list_all(&self) -> Result<Vec<Student>, RecordStoreError>;

    /// Find a student by store identity.
    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError>;

    /// Find a student by public identifier.
    async fn find_by_public_id(
        &self,
        public_id: &StudentPublicId,
    ) -> Result<Option<Student>, RecordStoreError>;

    /// Whether any student already has exactly this display name.
    async fn name_exists(&self, name: &str) -> Result<bool, RecordStoreError>;

    /// Every public identifier, used to allocate the next one.
    async fn list_public_ids(&self) -> Result<Vec<StudentPublicId>, RecordStoreError>;

    /// Create a student unless the public identifier is taken.
    async fn create(&self, student: &NewStudent)
    -> Result<InsertOutcome<Student>, RecordStoreError>;

    /// Change a display name. Returns `false` when the student does not exist.
    async fn rename(&self, id: StudentId, name: &str) -> Result<bool, RecordStoreError>;

    /// Replace stored password material. Returns `false` when the student
    /// does not exist.
    async fn update_password(
        &self,
        id: StudentId,
        password: &Password,
    ) -> Result<bool, RecordStoreError>;

    /// Delete the student with their enrollments and attendance records in
    /// one transaction. Returns `false` when the student does not exist.
    async fn delete_cascade(&self, id: StudentId) -> Result<bool, RecordStoreError>;
}
