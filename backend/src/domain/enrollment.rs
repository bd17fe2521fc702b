//! Enrollment of students in courses and the listings built on it.

use super::{CourseCode, CourseId, StudentPublicId};

/// Fallback shown when a course has no lecturer assigned.
pub const UNASSIGNED_LECTURER: &str = "N/A";

/// The course a student just enrolled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolledCourse {
    /// Course code.
    pub code: CourseCode,
    /// Course name.
    pub name: String,
    /// Owner's display name, if the course has one.
    pub lecturer_name: Option<String>,
}

impl EnrolledCourse {
    /// Owner's display name or [`UNASSIGNED_LECTURER`].
    #[must_use]
    pub fn lecturer_display(&self) -> &str {
        self.lecturer_name.as_deref().unwrap_or(UNASSIGNED_LECTURER)
    }
}

/// Why an enrollment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentRejection {
    /// The student store identity does not resolve.
    StudentNotFound,
    /// The course code does not resolve.
    CourseNotFound,
    /// The pair already exists.
    AlreadyEnrolled,
}

impl EnrollmentRejection {
    /// User-facing message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::StudentNotFound => "Student not found.",
            Self::CourseNotFound => "Course not found.",
            Self::AlreadyEnrolled => "You are already enrolled in this course.",
        }
    }
}

/// Typed result of an enrollment attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentOutcome {
    /// The pair was created.
    Enrolled(EnrolledCourse),
    /// The attempt was refused; nothing was written.
    Rejected(EnrollmentRejection),
}

impl EnrollmentOutcome {
    /// User-facing message for either outcome.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Enrolled(course) => format!(
                "Successfully enrolled in {}. Your lecturer is {}.",
                course.name,
                course.lecturer_display()
            ),
            Self::Rejected(rejection) => rejection.message().to_owned(),
        }
    }
}

/// A course a student is enrolled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentEnrollment {
    /// Course store identity.
    pub course_id: CourseId,
    /// Course code.
    pub code: CourseCode,
    /// Course name.
    pub name: String,
    /// Owner's display name, if any.
    pub lecturer_name: Option<String>,
}

/// A student enrolled in a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseStudent {
    /// Public identifier.
    pub public_id: StudentPublicId,
    /// Display name.
    pub name: String,
}

/// One row of the admin-wide enrollment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentListing {
    /// Student public identifier.
    pub public_id: StudentPublicId,
    /// Student display name.
    pub student_name: String,
    /// Course code.
    pub course_code: CourseCode,
    /// Course name.
    pub course_name: String,
    /// Owner's display name, if any.
    pub lecturer_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn enrolled(lecturer_name: Option<&str>) -> EnrolledCourse {
        EnrolledCourse {
            code: CourseCode::parse("FLA-002").expect("valid code"),
            name: "Formal Language and Automata".to_owned(),
            lecturer_name: lecturer_name.map(str::to_owned),
        }
    }

    #[rstest]
    #[case(
        Some("Sir Rikip"),
        "Successfully enrolled in Formal Language and Automata. Your lecturer is Sir Rikip."
    )]
    #[case(
        None,
        "Successfully enrolled in Formal Language and Automata. Your lecturer is N/A."
    )]
    fn enrolled_message_names_lecturer(#[case] lecturer: Option<&str>, #[case] expected: &str) {
        assert_eq!(EnrollmentOutcome::Enrolled(enrolled(lecturer)).message(), expected);
    }

    #[rstest]
    fn rejection_message_is_verbatim() {
        let outcome = EnrollmentOutcome::Rejected(EnrollmentRejection::AlreadyEnrolled);
        assert_eq!(outcome.message(), "You are already enrolled in this course.");
    }
}
