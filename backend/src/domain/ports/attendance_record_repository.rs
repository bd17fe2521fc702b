//! Port for attendance records.

use async_trait::async_trait;

use crate::domain::{AttendanceEntry, CourseId, NewAttendanceRecord};

use super::{InsertOutcome, RecordStoreError};

/// Port for committing attendance and reading a course's report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceRecordRepository: Send + Sync {
    /// Store the record unless the (student, course) pair already has one.
    async fn insert_if_absent(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<InsertOutcome<()>, RecordStoreError>;

    /// Entries for the course, newest first.
    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<AttendanceEntry>, RecordStoreError>;
}
