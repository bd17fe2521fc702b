//! In-memory record store.
//!
//! Implements every repository port over a single mutex-guarded table set.
//! Each port call takes the lock once, so check-then-write operations such
//! as insert-if-absent and cascading deletes are atomic with respect to
//! other callers. Used when no database is configured and in HTTP tests.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    AttendanceCodeRepository, AttendanceRecordRepository, CourseRepository,
    EnrollmentRepository, InsertOutcome, LecturerRepository, RecordStoreError,
    StudentRepository,
};
use crate::domain::{
    AttendanceEntry, Course, CourseCode, CourseId, CourseStudent, EnrollmentListing, IssuedCode,
    Lecturer, LecturerId, NewAttendanceRecord, NewCourse, NewIssuedCode, NewLecturer, NewStudent,
    Password, Student, StudentEnrollment, StudentId, StudentPublicId, Username,
};

#[derive(Debug, Clone)]
struct RecordRow {
    student: StudentId,
    course: CourseId,
    recorded_at: DateTime<Utc>,
    sequence: i64,
}

#[derive(Debug, Default)]
struct Tables {
    lecturers: Vec<Lecturer>,
    courses: Vec<Course>,
    students: Vec<Student>,
    enrollments: Vec<(StudentId, CourseId)>,
    codes: Vec<IssuedCode>,
    records: Vec<RecordRow>,
    last_id: i32,
    last_sequence: i64,
}

impl Tables {
    fn next_id(&mut self) -> Result<i32, RecordStoreError> {
        self.last_id = self
            .last_id
            .checked_add(1)
            .ok_or_else(|| RecordStoreError::query("identity space exhausted"))?;
        Ok(self.last_id)
    }

    fn next_sequence(&mut self) -> i64 {
        self.last_sequence = self.last_sequence.saturating_add(1);
        self.last_sequence
    }

    fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|course| course.id == id)
    }

    fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.iter().find(|student| student.id == id)
    }

    fn lecturer_name(&self, id: Option<LecturerId>) -> Option<String> {
        let id = id?;
        self.lecturers
            .iter()
            .find(|lecturer| lecturer.id == id)
            .map(|lecturer| lecturer.name.clone())
    }

    fn purge_course_dependents(&mut self, course: CourseId) {
        self.codes.retain(|code| code.course_id != course);
        self.records.retain(|record| record.course != course);
        self.enrollments.retain(|(_, enrolled)| *enrolled != course);
    }
}

/// Record store held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RecordStoreError> {
        self.tables
            .lock()
            .map_err(|_| RecordStoreError::connection("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl CourseRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Course>, RecordStoreError> {
        let tables = self.lock()?;
        let mut courses = tables.courses.clone();
        courses.sort_by_key(|course| course.id);
        Ok(courses)
    }

    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<Course>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .courses
            .iter()
            .find(|course| &course.code == code)
            .cloned())
    }

    async fn find_by_id(&self, id: CourseId) -> Result<Option<Course>, RecordStoreError> {
        Ok(self.lock()?.course(id).cloned())
    }

    async fn list_for_lecturer(
        &self,
        lecturer: LecturerId,
    ) -> Result<Vec<Course>, RecordStoreError> {
        let tables = self.lock()?;
        let mut courses: Vec<Course> = tables
            .courses
            .iter()
            .filter(|course| course.is_owned_by(lecturer))
            .cloned()
            .collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(courses)
    }

    async fn create(&self, course: &NewCourse) -> Result<InsertOutcome<Course>, RecordStoreError> {
        let mut tables = self.lock()?;
        if tables.courses.iter().any(|existing| existing.code == course.code) {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        let created = Course {
            id: CourseId::new(tables.next_id()?),
            code: course.code.clone(),
            name: course.name.clone(),
            lecturer_id: course.lecturer_id,
        };
        tables.courses.push(created.clone());
        Ok(InsertOutcome::Inserted(created))
    }

    async fn assign_lecturer(
        &self,
        course: CourseId,
        lecturer: LecturerId,
    ) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let Some(found) = tables.courses.iter_mut().find(|c| c.id == course) else {
            return Ok(false);
        };
        found.lecturer_id = Some(lecturer);
        Ok(true)
    }

    async fn delete_cascade(&self, course: CourseId) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let before = tables.courses.len();
        tables.courses.retain(|existing| existing.id != course);
        if tables.courses.len() == before {
            return Ok(false);
        }
        tables.purge_course_dependents(course);
        Ok(true)
    }
}

#[async_trait]
impl StudentRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Student>, RecordStoreError> {
        let mut students = self.lock()?.students.clone();
        students.sort_by(|a, b| a.public_id.cmp(&b.public_id));
        Ok(students)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, RecordStoreError> {
        Ok(self.lock()?.student(id).cloned())
    }

    async fn find_by_public_id(
        &self,
        public_id: &StudentPublicId,
    ) -> Result<Option<Student>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .students
            .iter()
            .find(|student| &student.public_id == public_id)
            .cloned())
    }

    async fn name_exists(&self, name: &str) -> Result<bool, RecordStoreError> {
        Ok(self.lock()?.students.iter().any(|student| student.name == name))
    }

    async fn list_public_ids(&self) -> Result<Vec<StudentPublicId>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .students
            .iter()
            .map(|student| student.public_id.clone())
            .collect())
    }

    async fn create(
        &self,
        student: &NewStudent,
    ) -> Result<InsertOutcome<Student>, RecordStoreError> {
        let mut tables = self.lock()?;
        if tables
            .students
            .iter()
            .any(|existing| existing.public_id == student.public_id)
        {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        let created = Student {
            id: StudentId::new(tables.next_id()?),
            public_id: student.public_id.clone(),
            name: student.name.clone(),
            password: student.password.clone(),
        };
        tables.students.push(created.clone());
        Ok(InsertOutcome::Inserted(created))
    }

    async fn rename(&self, id: StudentId, name: &str) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        name.clone_into(&mut student.name);
        Ok(true)
    }

    async fn update_password(
        &self,
        id: StudentId,
        password: &Password,
    ) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let Some(student) = tables.students.iter_mut().find(|s| s.id == id) else {
            return Ok(false);
        };
        student.password = password.clone();
        Ok(true)
    }

    async fn delete_cascade(&self, id: StudentId) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let before = tables.students.len();
        tables.students.retain(|student| student.id != id);
        if tables.students.len() == before {
            return Ok(false);
        }
        tables.enrollments.retain(|(student, _)| *student != id);
        tables.records.retain(|record| record.student != id);
        Ok(true)
    }
}

#[async_trait]
impl LecturerRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Lecturer>, RecordStoreError> {
        let mut lecturers = self.lock()?.lecturers.clone();
        lecturers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(lecturers)
    }

    async fn find_by_id(&self, id: LecturerId) -> Result<Option<Lecturer>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables.lecturers.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Lecturer>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .lecturers
            .iter()
            .find(|l| &l.username == username)
            .cloned())
    }

    async fn create(
        &self,
        lecturer: &NewLecturer,
    ) -> Result<InsertOutcome<Lecturer>, RecordStoreError> {
        let mut tables = self.lock()?;
        if tables
            .lecturers
            .iter()
            .any(|existing| existing.username == lecturer.username)
        {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        let created = Lecturer {
            id: LecturerId::new(tables.next_id()?),
            username: lecturer.username.clone(),
            name: lecturer.name.clone(),
            password: lecturer.password.clone(),
        };
        tables.lecturers.push(created.clone());
        Ok(InsertOutcome::Inserted(created))
    }

    async fn delete_cascade(&self, id: LecturerId) -> Result<bool, RecordStoreError> {
        let mut tables = self.lock()?;
        let before = tables.lecturers.len();
        tables.lecturers.retain(|lecturer| lecturer.id != id);
        if tables.lecturers.len() == before {
            return Ok(false);
        }
        let owned: Vec<CourseId> = tables
            .courses
            .iter()
            .filter(|course| course.is_owned_by(id))
            .map(|course| course.id)
            .collect();
        tables.courses.retain(|course| !course.is_owned_by(id));
        for course in owned {
            tables.purge_course_dependents(course);
        }
        Ok(true)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<InsertOutcome<()>, RecordStoreError> {
        let mut tables = self.lock()?;
        if tables.enrollments.contains(&(student, course)) {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        tables.enrollments.push((student, course));
        Ok(InsertOutcome::Inserted(()))
    }

    async fn exists(
        &self,
        student: StudentId,
        course: CourseId,
    ) -> Result<bool, RecordStoreError> {
        Ok(self.lock()?.enrollments.contains(&(student, course)))
    }

    async fn list_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<StudentEnrollment>, RecordStoreError> {
        let tables = self.lock()?;
        let mut listing: Vec<StudentEnrollment> = tables
            .enrollments
            .iter()
            .filter(|(enrolled, _)| *enrolled == student)
            .filter_map(|(_, course)| tables.course(*course))
            .map(|course| StudentEnrollment {
                course_id: course.id,
                code: course.code.clone(),
                name: course.name.clone(),
                lecturer_name: tables.lecturer_name(course.lecturer_id),
            })
            .collect();
        listing.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(listing)
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<CourseStudent>, RecordStoreError> {
        let tables = self.lock()?;
        let mut listing: Vec<CourseStudent> = tables
            .enrollments
            .iter()
            .filter(|(_, enrolled)| *enrolled == course)
            .filter_map(|(student, _)| tables.student(*student))
            .map(|student| CourseStudent {
                public_id: student.public_id.clone(),
                name: student.name.clone(),
            })
            .collect();
        listing.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(listing)
    }

    async fn list_all(&self) -> Result<Vec<EnrollmentListing>, RecordStoreError> {
        let tables = self.lock()?;
        let mut listing: Vec<EnrollmentListing> = tables
            .enrollments
            .iter()
            .filter_map(|(student, course)| {
                let student = tables.student(*student)?;
                let course = tables.course(*course)?;
                Some(EnrollmentListing {
                    public_id: student.public_id.clone(),
                    student_name: student.name.clone(),
                    course_code: course.code.clone(),
                    course_name: course.name.clone(),
                    lecturer_name: tables.lecturer_name(course.lecturer_id),
                })
            })
            .collect();
        listing.sort_by(|a, b| {
            a.course_code
                .cmp(&b.course_code)
                .then_with(|| a.student_name.cmp(&b.student_name))
        });
        Ok(listing)
    }
}

#[async_trait]
impl AttendanceCodeRepository for InMemoryStore {
    async fn insert(&self, code: &NewIssuedCode) -> Result<IssuedCode, RecordStoreError> {
        let mut tables = self.lock()?;
        let issued = IssuedCode {
            course_id: code.course_id,
            code: code.code.clone(),
            issued_at: code.issued_at,
            sequence: tables.next_sequence(),
        };
        tables.codes.push(issued.clone());
        Ok(issued)
    }

    async fn latest_for_course(
        &self,
        course: CourseId,
    ) -> Result<Option<IssuedCode>, RecordStoreError> {
        let tables = self.lock()?;
        Ok(tables
            .codes
            .iter()
            .filter(|code| code.course_id == course)
            .max_by_key(|code| code.recency())
            .cloned())
    }
}

#[async_trait]
impl AttendanceRecordRepository for InMemoryStore {
    async fn insert_if_absent(
        &self,
        record: &NewAttendanceRecord,
    ) -> Result<InsertOutcome<()>, RecordStoreError> {
        let mut tables = self.lock()?;
        let duplicate = tables
            .records
            .iter()
            .any(|row| row.student == record.student_id && row.course == record.course_id);
        if duplicate {
            return Ok(InsertOutcome::AlreadyPresent);
        }
        let sequence = tables.next_sequence();
        tables.records.push(RecordRow {
            student: record.student_id,
            course: record.course_id,
            recorded_at: record.recorded_at,
            sequence,
        });
        Ok(InsertOutcome::Inserted(()))
    }

    async fn list_for_course(
        &self,
        course: CourseId,
    ) -> Result<Vec<AttendanceEntry>, RecordStoreError> {
        let tables = self.lock()?;
        let mut rows: Vec<&RecordRow> = tables
            .records
            .iter()
            .filter(|row| row.course == course)
            .collect();
        rows.sort_by(|a, b| {
            (b.recorded_at, b.sequence).cmp(&(a.recorded_at, a.sequence))
        });
        Ok(rows
            .into_iter()
            .filter_map(|row| {
                tables.student(row.student).map(|student| AttendanceEntry {
                    student_name: student.name.clone(),
                    recorded_at: row.recorded_at,
                })
            })
            .collect())
    }
}
