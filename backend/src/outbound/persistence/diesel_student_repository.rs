//! PostgreSQL-backed `StudentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{InsertOutcome, RecordStoreError, StudentRepository};
use crate::domain::{NewStudent, Password, Student, StudentId, StudentPublicId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, rows_into};
use super::models::{NewStudentRow, StudentRow};
use super::pool::DbPool;
use super::schema::{attendance_records, enrollments, students};

/// Diesel-backed student repository.
#[derive(Clone)]
pub struct DieselStudentRepository {
    pool: DbPool,
}

impl DieselStudentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list_all(&self) -> Result<Vec<Student>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<StudentRow> = students::table
            .select(StudentRow::as_select())
            .order(students::public_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_into(rows)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Student::try_from).transpose()
    }

    async fn find_by_public_id(
        &self,
        public_id: &StudentPublicId,
    ) -> Result<Option<Student>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<StudentRow> = students::table
            .filter(students::public_id.eq(public_id.as_str()))
            .select(StudentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Student::try_from).transpose()
    }

    async fn name_exists(&self, name: &str) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(students::table.filter(students::name.eq(name))))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn list_public_ids(&self) -> Result<Vec<StudentPublicId>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let raw: Vec<String> = students::table
            .select(students::public_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        raw.iter()
            .map(|id| {
                StudentPublicId::parse(id)
                    .map_err(|err| RecordStoreError::query(format!("invalid students row: {err}")))
            })
            .collect()
    }

    async fn create(
        &self,
        student: &NewStudent,
    ) -> Result<InsertOutcome<Student>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewStudentRow {
            public_id: student.public_id.as_str(),
            name: student.name.as_str(),
            password: student.password.expose(),
        };
        let row: Option<StudentRow> = diesel::insert_into(students::table)
            .values(&new_row)
            .on_conflict(students::public_id)
            .do_nothing()
            .returning(StudentRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        match row {
            Some(row) => Ok(InsertOutcome::Inserted(Student::try_from(row)?)),
            None => Ok(InsertOutcome::AlreadyPresent),
        }
    }

    async fn rename(&self, id: StudentId, name: &str) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(students::table.find(id.get()))
            .set(students::name.eq(name))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn update_password(
        &self,
        id: StudentId,
        password: &Password,
    ) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated = diesel::update(students::table.find(id.get()))
            .set(students::password.eq(password.expose()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }

    async fn delete_cascade(&self, id: StudentId) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let student_id = id.get();
        conn.transaction(|conn| {
            async move {
                diesel::delete(
                    attendance_records::table.filter(attendance_records::student_id.eq(student_id)),
                )
                .execute(conn)
                .await?;
                diesel::delete(enrollments::table.filter(enrollments::student_id.eq(student_id)))
                    .execute(conn)
                    .await?;
                let deleted = diesel::delete(students::table.find(student_id))
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
