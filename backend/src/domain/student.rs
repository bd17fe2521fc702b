//! Students and the public `S-NNN` identifier scheme.

use serde::Serialize;

use super::{Password, StudentId};

/// Prefix shared by auto-assigned public identifiers.
pub const STUDENT_ID_PREFIX: &str = "S-";
const STUDENT_ID_MIN_DIGITS: usize = 3;

/// Validation failures for [`StudentPublicId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudentPublicIdError {
    /// The identifier was blank once trimmed.
    #[error("student id must not be empty")]
    Empty,
}

/// Human-facing student identifier such as `S-001`.
///
/// ## Invariants
/// - Trimmed, upper-cased and non-empty. Seeded or imported identifiers need
///   not follow the `S-NNN` pattern; only auto-assigned ones do.
///
/// # Examples
/// ```
/// use attendance::domain::StudentPublicId;
///
/// let id = StudentPublicId::parse("s-007").expect("valid id");
/// assert_eq!(id.as_str(), "S-007");
/// assert_eq!(id.sequence_number(), Some(7));
/// assert_eq!(id.default_password(), "700-S");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StudentPublicId(String);

impl StudentPublicId {
    /// Normalise and validate a raw public identifier.
    ///
    /// # Errors
    /// Returns [`StudentPublicIdError::Empty`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, StudentPublicIdError> {
        let normalized = raw.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(StudentPublicIdError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Format the identifier for sequence number `n`, zero-padded to three
    /// digits.
    #[must_use]
    pub fn from_sequence(n: u32) -> Self {
        Self(format!(
            "{STUDENT_ID_PREFIX}{n:0width$}",
            width = STUDENT_ID_MIN_DIGITS
        ))
    }

    /// Numeric suffix when the identifier matches `S-<digits>`.
    #[must_use]
    pub fn sequence_number(&self) -> Option<u32> {
        let digits = self.0.strip_prefix(STUDENT_ID_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    /// Initial password: the identifier with its characters reversed.
    #[must_use]
    pub fn default_password(&self) -> String {
        self.0.chars().rev().collect()
    }

    /// Borrow the normalised identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for StudentPublicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Allocate the next public identifier: one past the largest `S-<digits>`
/// suffix in `existing`, or `S-001` when none match.
///
/// # Examples
/// ```
/// use attendance::domain::{StudentPublicId, next_student_public_id};
///
/// let existing = [
///     StudentPublicId::parse("S-001").unwrap(),
///     StudentPublicId::parse("S-009").unwrap(),
///     StudentPublicId::parse("GUEST").unwrap(),
/// ];
/// assert_eq!(next_student_public_id(&existing).as_str(), "S-010");
/// ```
#[must_use]
pub fn next_student_public_id<'a>(
    existing: impl IntoIterator<Item = &'a StudentPublicId>,
) -> StudentPublicId {
    let max = existing
        .into_iter()
        .filter_map(StudentPublicId::sequence_number)
        .max()
        .unwrap_or(0);
    StudentPublicId::from_sequence(max.saturating_add(1))
}

/// A student as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Store identity.
    pub id: StudentId,
    /// Public identifier.
    pub public_id: StudentPublicId,
    /// Display name.
    pub name: String,
    /// Stored password material.
    pub password: Password,
}

/// Values required to create a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// Public identifier.
    pub public_id: StudentPublicId,
    /// Display name.
    pub name: String,
    /// Stored password material.
    pub password: Password,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(raw: &[&str]) -> Vec<StudentPublicId> {
        raw.iter()
            .map(|id| StudentPublicId::parse(id).expect("valid id"))
            .collect()
    }

    #[rstest]
    #[case(&[], "S-001")]
    #[case(&["S-001"], "S-002")]
    #[case(&["S-001", "S-002"], "S-003")]
    #[case(&["S-002", "S-010", "S-003"], "S-011")]
    #[case(&["S-999"], "S-1000")]
    #[case(&["S-1000", "S-999"], "S-1001")]
    #[case(&["X-050", "S-", "S-1A", "STAFF"], "S-001")]
    fn next_id_increments_numeric_maximum(#[case] existing: &[&str], #[case] expected: &str) {
        let existing = ids(existing);
        assert_eq!(next_student_public_id(&existing).as_str(), expected);
    }

    #[rstest]
    #[case("S-001", Some(1))]
    #[case("S-042", Some(42))]
    #[case("S-", None)]
    #[case("S-+1", None)]
    #[case("T-001", None)]
    fn sequence_number_requires_digit_suffix(#[case] raw: &str, #[case] expected: Option<u32>) {
        let id = StudentPublicId::parse(raw).expect("valid id");
        assert_eq!(id.sequence_number(), expected);
    }

    #[rstest]
    #[case("S-001", "100-S")]
    #[case("S-002", "200-S")]
    #[case("S-123", "321-S")]
    fn default_password_reverses_identifier(#[case] raw: &str, #[case] expected: &str) {
        let id = StudentPublicId::parse(raw).expect("valid id");
        assert_eq!(id.default_password(), expected);
    }

    #[rstest]
    fn parse_rejects_blank() {
        assert_eq!(StudentPublicId::parse("  "), Err(StudentPublicIdError::Empty));
    }
}
