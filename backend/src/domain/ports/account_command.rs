//! Driving port for student and lecturer sign-in and password changes.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::{Error, LecturerCourses, LoginCredentials, Student};

/// A student's request to replace their password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChangeRequest {
    /// Raw student public identifier.
    pub student_id: String,
    /// Current password.
    pub old_password: Zeroizing<String>,
    /// Replacement password.
    pub new_password: Zeroizing<String>,
}

/// Account operations for students and lecturers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountCommand: Send + Sync {
    /// Authenticate a student by public identifier and password.
    async fn student_login(&self, credentials: &LoginCredentials) -> Result<Student, Error>;

    /// Authenticate a lecturer by username and password, returning their
    /// courses (none for the administrator).
    async fn lecturer_login(&self, credentials: &LoginCredentials)
    -> Result<LecturerCourses, Error>;

    /// Replace a student's password after checking the current one.
    async fn change_student_password(&self, request: &PasswordChangeRequest) -> Result<(), Error>;
}
