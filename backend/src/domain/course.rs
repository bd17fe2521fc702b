//! Courses and their human-assigned codes.

use serde::Serialize;

use super::{CourseId, LecturerId};

/// Maximum length of a course code, matching the store column width.
pub const COURSE_CODE_MAX_LEN: usize = 10;

/// Validation failures for [`CourseCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseCodeError {
    /// The code was blank once trimmed.
    #[error("course code must not be empty")]
    Empty,
    /// The code exceeds [`COURSE_CODE_MAX_LEN`] characters.
    #[error("course code must be at most {max} characters")]
    TooLong {
        /// Permitted maximum.
        max: usize,
    },
}

/// Unique course code such as `OSD-001`.
///
/// ## Invariants
/// - Trimmed, upper-cased, between 1 and [`COURSE_CODE_MAX_LEN`] characters.
///
/// # Examples
/// ```
/// use attendance::domain::CourseCode;
///
/// let code = CourseCode::parse(" osd-001 ").expect("valid code");
/// assert_eq!(code.as_str(), "OSD-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    /// Normalise and validate a raw course code.
    ///
    /// # Errors
    /// Returns [`CourseCodeError`] when the code is blank or too long.
    pub fn parse(raw: &str) -> Result<Self, CourseCodeError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(CourseCodeError::Empty);
        }
        if normalized.chars().count() > COURSE_CODE_MAX_LEN {
            return Err(CourseCodeError::TooLong {
                max: COURSE_CODE_MAX_LEN,
            });
        }
        Ok(Self(normalized))
    }

    /// Borrow the normalised code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A course as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Store identity.
    pub id: CourseId,
    /// Unique course code.
    pub code: CourseCode,
    /// Display name.
    pub name: String,
    /// Owning lecturer; `None` once the owner has been removed.
    pub lecturer_id: Option<LecturerId>,
}

impl Course {
    /// Whether `lecturer` owns this course.
    #[must_use]
    pub fn is_owned_by(&self, lecturer: LecturerId) -> bool {
        self.lecturer_id == Some(lecturer)
    }
}

/// Values required to create a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCourse {
    /// Unique course code.
    pub code: CourseCode,
    /// Display name.
    pub name: String,
    /// Initial owner, if any.
    pub lecturer_id: Option<LecturerId>,
}
