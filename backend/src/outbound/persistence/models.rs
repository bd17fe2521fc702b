//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types revalidate
//! every stored value and report malformed rows as query errors.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ports::RecordStoreError;
use crate::domain::{
    AttendanceCode, Course, CourseCode, CourseId, IssuedCode, Lecturer, LecturerId, Password,
    Student, StudentId, StudentPublicId, Username,
};

use super::schema::{
    attendance_codes, attendance_records, courses, enrollments, lecturers, students,
};

fn invalid_column(table: &str, error: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::query(format!("invalid {table} row: {error}"))
}

/// Row struct for reading from the lecturers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lecturers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LecturerRow {
    pub id: i32,
    pub username: String,
    pub name: String,
    pub password: String,
}

impl TryFrom<LecturerRow> for Lecturer {
    type Error = RecordStoreError;

    fn try_from(row: LecturerRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LecturerId::new(row.id),
            username: Username::parse(&row.username)
                .map_err(|e| invalid_column("lecturers", e))?,
            name: row.name,
            password: Password::new(row.password),
        })
    }
}

/// Insertable struct for creating lecturer accounts.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lecturers)]
pub(crate) struct NewLecturerRow<'a> {
    pub username: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

/// Row struct for reading from the courses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub lecturer_id: Option<i32>,
}

impl TryFrom<CourseRow> for Course {
    type Error = RecordStoreError;

    fn try_from(row: CourseRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CourseId::new(row.id),
            code: CourseCode::parse(&row.code).map_err(|e| invalid_column("courses", e))?,
            name: row.name,
            lecturer_id: row.lecturer_id.map(LecturerId::new),
        })
    }
}

/// Insertable struct for creating courses.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub code: &'a str,
    pub name: &'a str,
    pub lecturer_id: Option<i32>,
}

/// Row struct for reading from the students table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i32,
    pub public_id: String,
    pub name: String,
    pub password: String,
}

impl TryFrom<StudentRow> for Student {
    type Error = RecordStoreError;

    fn try_from(row: StudentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: StudentId::new(row.id),
            public_id: StudentPublicId::parse(&row.public_id)
                .map_err(|e| invalid_column("students", e))?,
            name: row.name,
            password: Password::new(row.password),
        })
    }
}

/// Insertable struct for creating students.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = students)]
pub(crate) struct NewStudentRow<'a> {
    pub public_id: &'a str,
    pub name: &'a str,
    pub password: &'a str,
}

/// Insertable struct for enrollment pairs.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = enrollments)]
pub(crate) struct NewEnrollmentRow {
    pub student_id: i32,
    pub course_id: i32,
}

/// Row struct for reading from the attendance_codes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = attendance_codes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AttendanceCodeRow {
    pub id: i64,
    pub course_id: i32,
    pub code: String,
    pub issued_at: DateTime<Utc>,
}

impl TryFrom<AttendanceCodeRow> for IssuedCode {
    type Error = RecordStoreError;

    fn try_from(row: AttendanceCodeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            course_id: CourseId::new(row.course_id),
            code: AttendanceCode::parse(&row.code)
                .map_err(|e| invalid_column("attendance_codes", e))?,
            issued_at: row.issued_at,
            sequence: row.id,
        })
    }
}

/// Insertable struct for issued codes.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = attendance_codes)]
pub(crate) struct NewAttendanceCodeRow<'a> {
    pub course_id: i32,
    pub code: &'a str,
    pub issued_at: DateTime<Utc>,
}

/// Insertable struct for attendance records.
#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = attendance_records)]
pub(crate) struct NewAttendanceRecordRow {
    pub student_id: i32,
    pub course_id: i32,
    pub recorded_at: DateTime<Utc>,
}
