//! PostgreSQL-backed `AttendanceCodeRepository` implementation using Diesel
//! ORM.
//!
//! Codes are append-only. The current code for a course is the newest row by
//! `(issued_at, id)`; the `BIGSERIAL` id doubles as the tie-break sequence.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttendanceCodeRepository, RecordStoreError};
use crate::domain::{CourseId, IssuedCode, NewIssuedCode};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AttendanceCodeRow, NewAttendanceCodeRow};
use super::pool::DbPool;
use super::schema::attendance_codes;

/// Diesel-backed issued-code repository.
#[derive(Clone)]
pub struct DieselAttendanceCodeRepository {
    pool: DbPool,
}

impl DieselAttendanceCodeRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceCodeRepository for DieselAttendanceCodeRepository {
    async fn insert(&self, code: &NewIssuedCode) -> Result<IssuedCode, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AttendanceCodeRow = diesel::insert_into(attendance_codes::table)
            .values(NewAttendanceCodeRow {
                course_id: code.course_id.get(),
                code: code.code.as_str(),
                issued_at: code.issued_at,
            })
            .returning(AttendanceCodeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        IssuedCode::try_from(row)
    }

    async fn latest_for_course(
        &self,
        course: CourseId,
    ) -> Result<Option<IssuedCode>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AttendanceCodeRow> = attendance_codes::table
            .filter(attendance_codes::course_id.eq(course.get()))
            .order((
                attendance_codes::issued_at.desc(),
                attendance_codes::id.desc(),
            ))
            .select(AttendanceCodeRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(IssuedCode::try_from).transpose()
    }
}
