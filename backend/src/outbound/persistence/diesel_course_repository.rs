//! PostgreSQL-backed `CourseRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{CourseRepository, InsertOutcome, RecordStoreError};
use crate::domain::{Course, CourseCode, CourseId, LecturerId, NewCourse};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, rows_into};
use super::models::{CourseRow, NewCourseRow};
use super::pool::DbPool;
use super::schema::{attendance_codes, attendance_records, courses, enrollments};

/// Diesel-backed course repository.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Remove every row that references the given courses.
///
/// Runs inside the caller's transaction.
pub(super) async fn purge_course_dependents(
    conn: &mut diesel_async::AsyncPgConnection,
    course_ids: &[i32],
) -> Result<(), diesel::result::Error> {
    diesel::delete(attendance_records::table)
        .filter(attendance_records::course_id.eq_any(course_ids))
        .execute(conn)
        .await?;
    diesel::delete(attendance_codes::table)
        .filter(attendance_codes::course_id.eq_any(course_ids))
        .execute(conn)
        .await?;
    diesel::delete(enrollments::table)
        .filter(enrollments::course_id.eq_any(course_ids))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn list_all(&self) -> Result<Vec<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .select(CourseRow::as_select())
            .order(courses::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_into(rows)
    }

    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .filter(courses::code.eq(code.as_str()))
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Course::try_from).transpose()
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CourseRow> = courses::table
            .find(id.get())
            .select(CourseRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Course::try_from).transpose()
    }

    async fn list_for_lecturer(
        &self,
        lecturer: LecturerId,
    ) -> Result<Vec<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<CourseRow> = courses::table
            .filter(courses::lecturer_id.eq(lecturer.get()))
            .select(CourseRow::as_select())
            .order(courses::code.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_into(rows)
    }

    async fn create(&self, course: &NewCourse) -> Result<InsertOutcome<Course>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewCourseRow {
            code: course.code.as_str(),
            name: course.name.as_str(),
            lecturer_id: course.lecturer_id.map(LecturerId::get),
        };
        let row: Option<CourseRow> = diesel::insert_into(courses::table)
            .values(&new_row)
            .on_conflict(courses::code)
            .do_nothing()
            .returning(CourseRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => Ok(InsertOutcome::Inserted(Course::try_from(row)?)),
            None => Ok(InsertOutcome::AlreadyPresent),
        }
    }

    async fn assign_lecturer(
        &self,
        course: CourseId,
        lecturer: LecturerId,
    ) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(courses::table.find(course.get()))
            .set(courses::lecturer_id.eq(Some(lecturer.get())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_cascade(&self, course: CourseId) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let course_id = course.get();
        conn.transaction(|conn| {
            async move {
                purge_course_dependents(conn, &[course_id]).await?;
                let deleted = diesel::delete(courses::table.find(course_id))
                    .execute(conn)
                    .await?;
                Ok(deleted > 0)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }
}
