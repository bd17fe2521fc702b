//! Driving ports for issuing attendance codes and reading the current one.

use async_trait::async_trait;

use crate::domain::{CodeIssueOutcome, CurrentCodeOutcome, Error, LecturerId};

/// Request to issue a new code for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCodeRequest {
    /// Raw course code as submitted.
    pub course_code: String,
    /// Lecturer asking for the code.
    pub lecturer_id: LecturerId,
}

/// Issues attendance codes for courses the caller owns.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCodeCommand: Send + Sync {
    /// Issue a fresh code. Refusals are reported in the outcome; `Err` is
    /// reserved for store faults.
    async fn issue_code(&self, request: &IssueCodeRequest) -> Result<CodeIssueOutcome, Error>;
}

/// Reads a course's current code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AttendanceCodeQuery: Send + Sync {
    /// The current code if it is still inside its validity window.
    async fn current_code(&self, course_code: &str) -> Result<CurrentCodeOutcome, Error>;
}
