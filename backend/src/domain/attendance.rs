//! Attendance records and the outcome of a redemption attempt.

use chrono::{DateTime, Utc};

use super::{Course, CourseId, StudentId};

/// An attendance record ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttendanceRecord {
    /// Attending student.
    pub student_id: StudentId,
    /// Course attended.
    pub course_id: CourseId,
    /// Submission instant.
    pub recorded_at: DateTime<Utc>,
}

/// One line of a course's attendance report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceEntry {
    /// Display name of the attending student.
    pub student_name: String,
    /// Submission instant.
    pub recorded_at: DateTime<Utc>,
}

/// A course with its attendance entries, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseAttendance {
    /// The course.
    pub course: Course,
    /// Entries ordered by `recorded_at` descending.
    pub entries: Vec<AttendanceEntry>,
}

/// Why a redemption attempt was refused.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedemptionRejection {
    /// The course code does not resolve.
    CourseNotFound,
    /// The student public identifier does not resolve.
    StudentNotFound,
    /// Enrollment is required and the student is not enrolled.
    NotEnrolled,
    /// The course has never had a code issued.
    NoCodeIssued,
    /// The submitted code differs from the current code.
    InvalidCode,
    /// The current code is older than the validity window.
    CodeExpired,
    /// The student already has a record for the course.
    AlreadyRecorded,
}

impl RedemptionRejection {
    /// User-facing message.
    ///
    /// `NoCodeIssued` deliberately shares the `InvalidCode` text so callers
    /// cannot probe whether a course has an outstanding code.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::CourseNotFound => "Invalid course code",
            Self::StudentNotFound => "Student not found.",
            Self::NotEnrolled => "You are not enrolled in this course.",
            Self::NoCodeIssued | Self::InvalidCode => "Invalid attendance code",
            Self::CodeExpired => "Attendance code has expired",
            Self::AlreadyRecorded => "You have already marked attendance for this class",
        }
    }
}

/// Typed result of a redemption attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedemptionOutcome {
    /// A record was created.
    Accepted {
        /// Display name of the student, used in the confirmation.
        student_name: String,
        /// Instant stored on the record.
        recorded_at: DateTime<Utc>,
    },
    /// The attempt was refused; nothing was written.
    Rejected(RedemptionRejection),
}

impl RedemptionOutcome {
    /// User-facing message for either outcome.
    ///
    /// # Examples
    /// ```
    /// use attendance::domain::{RedemptionOutcome, RedemptionRejection};
    ///
    /// let rejected = RedemptionOutcome::Rejected(RedemptionRejection::CodeExpired);
    /// assert_eq!(rejected.message(), "Attendance code has expired");
    /// ```
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Accepted { student_name, .. } => {
                format!("Valid Absence for {student_name}, Good Luck for Your Class!")
            }
            Self::Rejected(rejection) => rejection.message().to_owned(),
        }
    }

    /// Whether a record was created.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
