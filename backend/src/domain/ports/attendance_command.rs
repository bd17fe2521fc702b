//! Driving ports for redeeming attendance codes and reading attendance.

use async_trait::async_trait;

use crate::domain::{CourseAttendance, Error, RedemptionOutcome};

/// A student's submission of an attendance code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedemptionRequest {
    /// Raw student public identifier.
    pub student_id: String,
    /// Raw course code.
    pub course_code: String,
    /// Code as typed by the student.
    pub submitted_code: String,
}

/// Redeems attendance codes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCommand: Send + Sync {
    /// Run the redemption checks and commit a record when they pass.
    /// Refusals are reported in the outcome; `Err` is reserved for store
    /// faults.
    async fn redeem(&self, request: &RedemptionRequest) -> Result<RedemptionOutcome, Error>;
}

/// Reads attendance reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceQuery: Send + Sync {
    /// Attendance for a course, newest first; `None` when the course code
    /// does not resolve.
    async fn course_attendance(
        &self,
        course_code: &str,
    ) -> Result<Option<CourseAttendance>, Error>;
}
