//! PostgreSQL-backed `LecturerRepository` implementation using Diesel ORM.
//!
//! Deleting a lecturer removes the courses they own together with those
//! courses' enrollments, codes, and attendance records, all in one
//! transaction.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{InsertOutcome, LecturerRepository, RecordStoreError};
use crate::domain::{Lecturer, LecturerId, NewLecturer, Username};

use super::diesel_course_repository::purge_course_dependents;
use super::diesel_error_mapping::{map_diesel_error, map_pool_error, rows_into};
use super::models::{LecturerRow, NewLecturerRow};
use super::pool::DbPool;
use super::schema::{courses, lecturers};

/// Diesel-backed lecturer repository.
#[derive(Clone)]
pub struct DieselLecturerRepository {
    pool: DbPool,
}

impl DieselLecturerRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LecturerRepository for DieselLecturerRepository {
    async fn list_all(&self) -> Result<Vec<Lecturer>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<LecturerRow> = lecturers::table
            .select(LecturerRow::as_select())
            .order(lecturers::name.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_into(rows)
    }

    async fn find_by_id(&self, id: LecturerId) -> Result<Option<Lecturer>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LecturerRow> = lecturers::table
            .find(id.get())
            .select(LecturerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Lecturer::try_from).transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Lecturer>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<LecturerRow> = lecturers::table
            .filter(lecturers::username.eq(username.as_str()))
            .select(LecturerRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Lecturer::try_from).transpose()
    }

    async fn create(
        &self,
        lecturer: &NewLecturer,
    ) -> Result<InsertOutcome<Lecturer>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewLecturerRow {
            username: lecturer.username.as_str(),
            name: lecturer.name.as_str(),
            password: lecturer.password.expose(),
        };
        let row: Option<LecturerRow> = diesel::insert_into(lecturers::table)
            .values(&new_row)
            .on_conflict(lecturers::username)
            .do_nothing()
            .returning(LecturerRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => Ok(InsertOutcome::Inserted(Lecturer::try_from(row)?)),
            None => Ok(InsertOutcome::AlreadyPresent),
        }
    }

    async fn delete_cascade(&self, id: LecturerId) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let lecturer_id = id.get();
        conn.transaction(|conn| {
            async move {
                let owned: Vec<i32> = courses::table
                    .filter(courses::lecturer_id.eq(lecturer_id))
                    .select(courses::id)
                    .load(conn)
                    .await?;
                if !owned.is_empty() {
                    purge_course_dependents(conn, &owned).await?;
                    diesel::delete(courses::table.filter(courses::id.eq_any(&owned)))
                        .execute(conn)
                        .await?;
                }
                let deleted = diesel::delete(lecturers::table.find(lecturer_id))
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
