//! Port for lecturer account persistence.

use async_trait::async_trait;

use crate::domain::{Lecturer, LecturerId, NewLecturer, Username};

use super::{InsertOutcome, RecordStoreError};

/// Port for reading and mutating lecturer accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LecturerRepository: Send + Sync {
    /// Every lecturer, ordered by display name.
    async fn list_all(&self) -> Result<Vec<Lecturer>, RecordStoreError>;

    /// Find a lecturer by store identity.
    async fn find_by_id(&self, id: LecturerId) -> Result<Option<Lecturer>, RecordStoreError>;

    /// Find a lecturer by username.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Lecturer>, RecordStoreError>;

    /// Create an account unless the username is taken.
    async fn create(
        &self,
        lecturer: &NewLecturer,
    ) -> Result<InsertOutcome<Lecturer>, RecordStoreError>;

    /// Delete the lecturer, every course they own, and each course's codes,
    /// attendance records and enrollments in one transaction. Returns `false`
    /// when the lecturer does not exist.
    async fn delete_cascade(&self, id: LecturerId) -> Result<bool, RecordStoreError>;
}
