//! Shared error and result types for the record store repository ports, plus
//! the bundle services receive them in.

use std::sync::Arc;

use super::{
    AttendanceCodeRepository, AttendanceRecordRepository, CourseRepository,
    EnrollmentRepository, LecturerRepository, StudentRepository, define_port_error,
};

define_port_error! {
    /// Errors raised by record store adapters.
    pub enum RecordStoreError {
        /// The store could not be reached.
        Connection { message: String } => "record store connection failed: {message}",
        /// A query or mutation failed while executing.
        Query { message: String } => "record store query failed: {message}",
    }
}

/// Result of an insert that must not duplicate an existing row.
///
/// Adapters decide presence and perform the write atomically, so two
/// concurrent callers can never both observe `Inserted` for the same key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome<T> {
    /// The row was written.
    Inserted(T),
    /// A row with the same key already existed; nothing was written.
    AlreadyPresent,
}

impl<T> InsertOutcome<T> {
    /// The inserted value, if any.
    pub fn inserted(self) -> Option<T> {
        match self {
            Self::Inserted(value) => Some(value),
            Self::AlreadyPresent => None,
        }
    }
}

/// Injected handle to every record store repository.
///
/// Built once at start-up and cloned into each service.
#[derive(Clone)]
pub struct StorePorts {
    /// Course repository.
    pub courses: Arc<dyn CourseRepository>,
    /// Student repository.
    pub students: Arc<dyn StudentRepository>,
    /// Lecturer repository.
    pub lecturers: Arc<dyn LecturerRepository>,
    /// Enrollment repository.
    pub enrollments: Arc<dyn EnrollmentRepository>,
    /// Issued attendance code repository.
    pub codes: Arc<dyn AttendanceCodeRepository>,
    /// Attendance record repository.
    pub records: Arc<dyn AttendanceRecordRepository>,
}

impl StorePorts {
    /// Bundle a single adapter that implements every repository port.
    pub fn from_shared<S>(store: Arc<S>) -> Self
    where
        S: CourseRepository
            + StudentRepository
            + LecturerRepository
            + EnrollmentRepository
            + AttendanceCodeRepository
            + AttendanceRecordRepository
            + 'static,
    {
        Self {
            courses: store.clone(),
            students: store.clone(),
            lecturers: store.clone(),
            enrollments: store.clone(),
            codes: store.clone(),
            records: store,
        }
    }
}
