//! PostgreSQL-backed `EnrollmentRepository` implementation using Diesel ORM.
//!
//! Listings join through `courses` and left-join `lecturers` so that courses
//! without an owner still appear with no lecturer name.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EnrollmentRepository, InsertOutcome, RecordStoreError};
use crate::domain::{
    CourseCode, CourseId, CourseStudent, EnrollmentListing, StudentEnrollment, StudentId,
    StudentPublicId,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::NewEnrollmentRow;
use super::pool::DbPool;
use super::schema::{courses, enrollments, lecturers, students};

/// Diesel-backed enrollment repository.
#[derive(Clone)]
pub struct DieselEnrollmentRepository {
    pool: DbPool,
}

impl DieselEnrollmentRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn parse_course_code(raw: &str) -> Result<CourseCode, RecordStoreError> {
    CourseCode::parse(raw)
        .map_err(|err| RecordStoreError::query(format!("invalid courses row: {err}")))
}

fn parse_public_id(raw: &str) -> Result<StudentPublicId, RecordStoreError> {
    StudentPublicId::parse(raw)
        .map_err(|err| RecordStoreError::query(format!("invalid students row: {err}")))
}

#[async_trait]
impl EnrollmentRepository for DieselEnrollmentRepository {
    async fn insert_if_absent(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<InsertOutcome<()>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows_affected = diesel::insert_into(enrollments::table)
            .values(NewEnrollmentRow {
                student_id: student.get(),
                course_id: course.get(),
            })
            .on_conflict((enrollments::student_id, enrollments::course_id))
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

    async fn exists(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<bool, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(exists(
            enrollments::table
                .filter(enrollments::student_id.eq(student.get()))
                .filter(enrollments::course_id.eq(course.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn list_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<StudentEnrollment>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(i32, String, String, Option<String>)> = enrollments::table
            .inner_join(courses::table.left_join(lecturers::table))
            .filter(enrollments::student_id.eq(student.get()))
            .order(courses::code.asc())
            .select((
                courses::id,
                courses::code,
                courses::name,
                lecturers::name.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(course_id, code, name, lecturer_name)| {
                Ok(StudentEnrollment {
                    course_id: CourseId::new(course_id),
                    code: parse_course_code(&code)?,
                    name,
                    lecturer_name,
                })
            })
            .collect()
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<CourseStudent>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, String)> = enrollments::table
            .inner_join(students::table)
            .filter(enrollments::course_id.eq(course.get()))
            .order(students::name.asc())
            .select((students::public_id, students::name))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|(public_id, name)| {
                Ok(CourseStudent {
                    public_id: parse_public_id(&public_id)?,
                    name,
                })
            })
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<EnrollmentListing>, RecordStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<(String, String, String, String, Option<String>)> = enrollments::table
            .inner_join(students::table)
            .inner_join(courses::table.left_join(lecturers::table))
            .order((courses::code.asc(), students::name.asc()))
            .select((
                students::public_id,
                students::name,
                courses::code,
                courses::name,
                lecturers::name.nullable(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(
                |(public_id, student_name, course_code, course_name, lecturer_name)| {
                    Ok(EnrollmentListing {
                        public_id: parse_public_id(&public_id)?,
                        student_name,
                        course_code: parse_course_code(&course_code)?,
                        course_name,
                        lecturer_name,
                    })
                },
            )
            .collect()
    }
}
