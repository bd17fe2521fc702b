//! Driving port for directory listings and lookups.

use async_trait::async_trait;

use crate::domain::{Course, Error, LecturerCourses, Student};

/// Read-only directory access.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryQuery: Send + Sync {
    /// Every course.
    async fn list_courses(&self) -> Result<Vec<Course>, Error>;

    /// A course by raw code; `None` when it does not resolve.
    async fn find_course(&self, course_code: &str) -> Result<Option<Course>, Error>;

    /// Every student, ordered by public identifier.
    async fn list_students(&self) -> Result<Vec<Student>, Error>;

    /// Every lecturer except the administrator, with their courses.
    async fn list_lecturers_with_courses(&self) -> Result<Vec<LecturerCourses>, Error>;
}
