//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! One repository per record store port, all sharing a `bb8` pool of
//! `diesel-async` connections. Row structs (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module; repositories only
//! translate between rows and domain types.
//!
//! Schema migrations are embedded at build time and applied on start-up by
//! [`apply_migrations`].

mod diesel_attendance_code_repository;
mod diesel_attendance_record_repository;
mod diesel_course_repository;
mod diesel_enrollment_repository;
mod diesel_error_mapping;
mod diesel_lecturer_repository;
mod diesel_student_repository;
mod models;
mod pool;
mod schema;

use std::sync::Arc;

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

use crate::domain::ports::StorePorts;

pub use diesel_attendance_code_repository::DieselAttendanceCodeRepository;
pub use diesel_attendance_record_repository::DieselAttendanceRecordRepository;
pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_enrollment_repository::DieselEnrollmentRepository;
pub use diesel_lecturer_repository::DieselLecturerRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use pool::{DbPool, PoolConfig, PoolError};

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Failures while bringing the schema up to date.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The migration connection could not be opened.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply {
        /// Harness error text.
        message: String,
    },
}

/// Apply every pending migration to `database_url`.
///
/// Uses a synchronous connection; call it from a blocking context such as
/// `actix_web::web::block`.
///
/// # Errors
///
/// Returns [`MigrationError`] when connecting or migrating fails.
pub fn apply_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Apply {
            message: error.to_string(),
        })?;
    info!(count = applied.len(), "applied pending migrations");
    Ok(())
}

/// Bundle a Diesel repository for every record store port over `pool`.
pub fn diesel_store_ports(pool: &DbPool) -> StorePorts {
    StorePorts {
        courses: Arc::new(DieselCourseRepository::new(pool.clone())),
        students: Arc::new(DieselStudentRepository::new(pool.clone())),
        lecturers: Arc::new(DieselLecturerRepository::new(pool.clone())),
        enrollments: Arc::new(DieselEnrollmentRepository::new(pool.clone())),
        codes: Arc::new(DieselAttendanceCodeRepository::new(pool.clone())),
        records: Arc::new(DieselAttendanceRecordRepository::new(pool.clone())),
    }
}
