//! Port for issued attendance codes.

use async_trait::async_trait;

use crate::domain::{CourseId, IssuedCode, NewIssuedCode};

use super::RecordStoreError;

/// Port for appending issued codes and reading the current one.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCodeRepository: Send + Sync {
    /// Append a code, assigning the next insertion sequence.
    async fn insert(&self, code: &NewIssuedCode) -> Result<IssuedCode, RecordStoreError>;

    /// The course's code with the greatest `(issued_at, sequence)`.
    async fn latest_for_course(
        &self,
        course: CourseId,
    ) -> Result<Option<IssuedCode>, RecordStoreError>;
}
