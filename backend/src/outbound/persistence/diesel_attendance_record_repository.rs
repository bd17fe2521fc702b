//! PostgreSQL-backed `AttendanceRecordRepository` implementation using Diesel
//! ORM.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AttendanceRecordRepository, InsertOutcome, RecordStoreError};
use crate::domain::{AttendanceEntry, CourseId, NewAttendanceRecord};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewAttendanceRecordRow;
use super::pool::DbPool;
use super::schema::{attendance_records, students};

/// Diesel-backed attendance record repository.
#[derive(Clone)]
pub struct DieselAttendanceRecordRepository {
    pool: DbPool,
}

impl DieselAttendanceRecordRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AttendanceRecordRepository for DieselAttendanceRecordRepository {
    async fn insert_if_absent(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<InsertOutcome<()>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The (student_id, course_id) unique constraint makes the
        // check-and-insert atomic.
        let rows_affected = diesel::insert_into(attendance_records::table)
            .values(NewAttendanceRecordRow {
                student_id: record.student_id.get(),
                course_id: record.course_id.get(),
                recorded_at: record.recorded_at,
            })
            .on_conflict((
                attendance_records::student_id,
                attendance_records::course_id,
            ))
            .do_nothing()
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(if rows_affected == 0 {
            InsertOutcome::AlreadyPresent
        } else {
            InsertOutcome::Inserted(())
        })
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<AttendanceEntry>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, DateTime<Utc>)> = attendance_records::table
            .inner_join(students::table)
            .filter(attendance_records::course_id.eq(course.get()))
            .order((
                attendance_records::recorded_at.desc(),
                attendance_records::id.desc(),
            ))
            .select((students::name, attendance_records::recorded_at))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows
            .into_iter()
            .map(|(student_name, recorded_at)| AttendanceEntry {
                student_name,
                recorded_at,
            })
            .collect())
    }
}
