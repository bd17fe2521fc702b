//! Lecturer accounts, including the administrator.

use serde::Serialize;

use super::{Course, LecturerId, Password};

/// Username of the administrator account.
pub const ADMIN_USERNAME: &str = "admin";

/// Validation failures for [`Username`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UsernameError {
    /// The username was blank once trimmed.
    #[error("username must not be empty")]
    Empty,
}

/// Lecturer login name, stored lower-case.
///
/// # Examples
/// ```
/// use attendance::domain::Username;
///
/// let username = Username::parse(" Nur ").expect("valid username");
/// assert_eq!(username.as_str(), "nur");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Normalise and validate a raw username.
    ///
    /// # Errors
    /// Returns [`UsernameError::Empty`] for blank input.
    pub fn parse(raw: &str) -> Result<Self, UsernameError> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(UsernameError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Borrow the normalised username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether this is the administrator account name.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.0 == ADMIN_USERNAME
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lecturer account as held by the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lecturer {
    /// Store identity.
    pub id: LecturerId,
    /// Unique login name.
    pub username: Username,
    /// Display name, e.g. `Sir Nur`.
    pub name: String,
    /// Stored password material.
    pub password: Password,
}

impl Lecturer {
    /// Whether this account is the administrator.
    #[must_use]
    pub fn is_administrator(&self) -> bool {
        self.username.is_administrator()
    }
}

/// Values required to create a lecturer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLecturer {
    /// Unique login name.
    pub username: Username,
    /// Display name.
    pub name: String,
    /// Stored password material.
    pub password: Password,
}

/// A lecturer together with the courses they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LecturerCourses {
    /// The lecturer.
    pub lecturer: Lecturer,
    /// Courses currently assigned to them.
    pub courses: Vec<Course>,
}
