//! Attendance codes issued by lecturers and their validity window.
//!
//! A course may accumulate many issued codes. Only the most recent one, by
//! `(issued_at, sequence)`, is current; older rows simply go stale.

use chrono::{DateTime, Utc};

use super::CourseId;

/// Number of characters in an attendance code.
pub const CODE_LENGTH: usize = 6;

/// Characters an attendance code is drawn from.
pub const CODE_ALPHABET: &[u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// A code is redeemable while its age is at most this many milliseconds.
pub const CODE_VALIDITY_MS: i64 = 3_600_000;

/// Validation failures for [`AttendanceCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttendanceCodeError {
    /// The code does not have [`CODE_LENGTH`] characters.
    #[error("attendance code must be {expected} characters")]
    Length {
        /// Required length.
        expected: usize,
    },
    /// The code contains characters outside `A-Z0-9`.
    #[error("attendance code must be alphanumeric")]
    Alphabet,
}

/// A six character alphanumeric attendance code, stored upper-case.
///
/// # Examples
/// ```
/// use attendance::domain::AttendanceCode;
///
/// let code = AttendanceCode::parse("ab12cd").expect("valid code");
/// assert_eq!(code.as_str(), "AB12CD");
/// assert!(code.matches(" Ab12Cd "));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AttendanceCode(String);

impl AttendanceCode {
    /// Normalise and validate a raw code.
    ///
    /// # Errors
    /// Returns [`AttendanceCodeError`] when the length or alphabet is wrong.
    pub fn parse(raw: &str) -> Result<Self, AttendanceCodeError> {
        let normalized = raw.trim().to_ascii_uppercase();
        if normalized.len() != CODE_LENGTH {
            return Err(AttendanceCodeError::Length {
                expected: CODE_LENGTH,
            });
        }
        if !normalized.bytes().all(|b| CODE_ALPHABET.contains(&b)) {
            return Err(AttendanceCodeError::Alphabet);
        }
        Ok(Self(normalized))
    }

    /// Build a code from alphabet positions; each index wraps modulo the
    /// alphabet size.
    #[must_use]
    pub fn from_indices(indices: [usize; CODE_LENGTH]) -> Self {
        let code = indices
            .iter()
            .filter_map(|index| {
                index
                    .checked_rem(CODE_ALPHABET.len())
                    .and_then(|position| CODE_ALPHABET.get(position))
            })
            .map(|byte| char::from(*byte))
            .collect();
        Self(code)
    }

    /// Compare a submitted code, ignoring surrounding whitespace and case.
    #[must_use]
    pub fn matches(&self, submitted: &str) -> bool {
        submitted.trim().eq_ignore_ascii_case(&self.0)
    }

    /// Borrow the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for AttendanceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A code ready to be stored for a course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssuedCode {
    /// Course the code unlocks.
    pub course_id: CourseId,
    /// The code value.
    pub code: AttendanceCode,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
}

/// A stored code with its store-assigned ordering sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Course the code unlocks.
    pub course_id: CourseId,
    /// The code value.
    pub code: AttendanceCode,
    /// Issue instant.
    pub issued_at: DateTime<Utc>,
    /// Monotonic insertion sequence; breaks ties between equal instants.
    pub sequence: i64,
}

impl IssuedCode {
    /// Milliseconds elapsed between issue and `now`.
    #[must_use]
    pub fn age_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.issued_at).num_milliseconds()
    }

    /// Whether the code has aged past [`CODE_VALIDITY_MS`] at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.age_ms(now) > CODE_VALIDITY_MS
    }

    /// Ordering key selecting the current code.
    #[must_use]
    pub fn recency(&self) -> (DateTime<Utc>, i64) {
        (self.issued_at, self.sequence)
    }
}

/// Result of asking for a new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeIssueOutcome {
    /// A new code is now current for the course.
    Issued(IssuedCode),
    /// The course is unknown or not owned by the requesting lecturer.
    Unauthorized,
}

impl CodeIssueOutcome {
    /// User-facing message for a refused issuance.
    pub const UNAUTHORIZED_MESSAGE: &'static str =
        "Unauthorized access to this course or course not found";
}

/// Result of asking for a course's current code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentCodeOutcome {
    /// The current code is still inside its validity window.
    Active(IssuedCode),
    /// No code was issued, or the latest one has expired.
    NoActiveCode,
    /// The course code does not resolve.
    CourseNotFound,
}

impl CurrentCodeOutcome {
    /// User-facing message for non-active outcomes.
    #[must_use]
    pub const fn failure_message(&self) -> Option<&'static str> {
        match self {
            Self::Active(_) => None,
            Self::NoActiveCode => Some("No active code"),
            Self::CourseNotFound => Some("Course not found"),
        }
    }
}
