//! Directory service: admin management of students, lecturers and courses.
//!
//! Refusals are returned as [`Error`] values whose code is a business
//! outcome (`invalid_request`, `not_found`, `conflict`, `forbidden`) and
//! whose message is shown to the admin verbatim.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::ports::{
    CreatedStudent, CredentialVerifier, DirectoryCommand, DirectoryQuery, InsertOutcome,
    NewCourseRequest, NewLecturerRequest, StorePorts,
};
use crate::domain::store_access::{find_course, find_student, map_store_error};
use crate::domain::{
    Course, CourseCode, Error, Lecturer, LecturerCourses, LecturerId, NewCourse, NewLecturer,
    NewStudent, Student, StudentId, StudentPublicId, Username, next_student_public_id,
};

const STUDENT_NOT_FOUND: &str = "Student not found.";
const COURSE_NOT_FOUND: &str = "Course not found.";
const NEW_LECTURER_NOT_FOUND: &str = "New lecturer not found.";

/// Admin directory operations backed by the record store.
#[derive(Clone)]
pub struct DirectoryService {
    store: StorePorts,
    verifier: Arc<dyn CredentialVerifier>,
}

impl DirectoryService {
    /// Create the service from the store bundle and password policy.
    pub fn new(store: StorePorts, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }

    async fn require_course(&self, course_code: &str) -> Result<Course, Error> {
        find_course(self.store.courses.as_ref(), course_code)
            .await?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }

    async fn require_lecturer(&self, id: LecturerId, missing: &str) -> Result<Lecturer, Error> {
        self.store
            .lecturers
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(missing))
    }
}

#[async_trait]
impl DirectoryCommand for DirectoryService {
    async fn add_student(&self, name: &str) -> Result<CreatedStudent, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid_request("Student Name is required."));
        }
        let duplicate = self
            .store
            .students
            .name_exists(name)
            .await
            .map_err(map_store_error)?;
        if duplicate {
            return Err(Error::conflict("A student with this name already exists."));
        }

        let existing = self
            .store
            .students
            .list_public_ids()
            .await
            .map_err(map_store_error)?;
        let public_id = next_student_public_id(&existing);
        let initial_password = Zeroizing::new(public_id.default_password());
        let new_student = NewStudent {
            password: self.verifier.seal(&initial_password),
            public_id,
            name: name.to_owned(),
        };

        match self
            .store
            .students
            .create(&new_student)
            .await
            .map_err(map_store_error)?
        {
            InsertOutcome::Inserted(student) => {
                info!(student_id = %student.public_id, "student added");
                Ok(CreatedStudent {
                    student,
                    initial_password,
                })
            }
            InsertOutcome::AlreadyPresent => Err(Error::conflict(format!(
                "Student ID {} was taken concurrently; please retry.",
                new_student.public_id
            ))),
        }
    }

    async fn rename_student(&self, student: StudentId, new_name: &str) -> Result<(), Error> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(Error::invalid_request("New student name is required."));
        }
        let renamed = self
            .store
            .students
            .rename(student, new_name)
            .await
            .map_err(map_store_error)?;
        if !renamed {
            return Err(Error::not_found(STUDENT_NOT_FOUND));
        }
        info!(student = %student, "student renamed");
        Ok(())
    }

    async fn delete_student(&self, public_id: &str) -> Result<StudentPublicId, Error> {
        let student = find_student(self.store.students.as_ref(), public_id)
            .await?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))?;
        let deleted = self
            .store
            .students
            .delete_cascade(student.id)
            .await
            .map_err(map_store_error)?;
        if !deleted {
            return Err(Error::not_found(STUDENT_NOT_FOUND));
        }
        info!(student_id = %student.public_id, "student deleted");
        Ok(student.public_id)
    }

    async fn add_lecturer(&self, request: &NewLecturerRequest) -> Result<Lecturer, Error> {
        let name = request.name.trim();
        let username = Username::parse(&request.username)
            .ok()
            .filter(|_| !request.password.is_empty() && !name.is_empty());
        let Some(username) = username else {
            return Err(Error::invalid_request(
                "Username, password, and name are required.",
            ));
        };

        let new_lecturer = NewLecturer {
            username,
            name: name.to_owned(),
            password: self.verifier.seal(&request.password),
        };
        match self
            .store
            .lecturers
            .create(&new_lecturer)
            .await
            .map_err(map_store_error)?
        {
            InsertOutcome::Inserted(lecturer) => {
                info!(username = %lecturer.username, "lecturer added");
                Ok(lecturer)
            }
            InsertOutcome::AlreadyPresent => Err(Error::conflict(
                "Lecturer with this username already exists.",
            )),
        }
    }

    async fn delete_lecturer(&self, lecturer: LecturerId) -> Result<(), Error> {
        let found = self.require_lecturer(lecturer, "Lecturer not found.").await?;
        if found.is_administrator() {
            return Err(Error::forbidden(
                "Cannot delete the main administrator account.",
            ));
        }
        let deleted = self
            .store
            .lecturers
            .delete_cascade(lecturer)
            .await
            .map_err(map_store_error)?;
        if !deleted {
            return Err(Error::not_found("Lecturer not found."));
        }
        info!(username = %found.username, "lecturer deleted with owned courses");
        Ok(())
    }

    async fn add_course(&self, request: &NewCourseRequest) -> Result<Course, Error> {
        let name = request.name.trim();
        if request.code.trim().is_empty() || name.is_empty() {
            return Err(Error::invalid_request("Course code and name are required."));
        }
        let code = CourseCode::parse(&request.code)
            .map_err(|_| Error::invalid_request("Course code must be 1-10 characters."))?;
        if let Some(owner) = request.lecturer_id {
            self.require_lecturer(owner, NEW_LECTURER_NOT_FOUND).await?;
        }

        let new_course = NewCourse {
            code,
            name: name.to_owned(),
            lecturer_id: request.lecturer_id,
        };
        match self
            .store
            .courses
            .create(&new_course)
            .await
            .map_err(map_store_error)?
        {
            InsertOutcome::Inserted(course) => {
                info!(course_code = %course.code, "course added");
                Ok(course)
            }
            InsertOutcome::AlreadyPresent => {
                Err(Error::conflict("A course with this code already exists."))
            }
        }
    }

    async fn assign_lecturer(
        &self,
        course_code: &str,
        lecturer: LecturerId,
    ) -> Result<CourseCode, Error> {
        let course = self.require_course(course_code).await?;
        self.require_lecturer(lecturer, NEW_LECTURER_NOT_FOUND).await?;
        let assigned = self
            .store
            .courses
            .assign_lecturer(course.id, lecturer)
            .await
            .map_err(map_store_error)?;
        if !assigned {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        info!(course_code = %course.code, lecturer = %lecturer, "course reassigned");
        Ok(course.code)
    }

    async fn delete_course(&self, course_code: &str) -> Result<CourseCode, Error> {
        let course = self.require_course(course_code).await?;
        let deleted = self
            .store
            .courses
            .delete_cascade(course.id)
            .await
            .map_err(map_store_error)?;
        if !deleted {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        info!(course_code = %course.code, "course deleted");
        Ok(course.code)
    }
}

#[async_trait]
impl DirectoryQuery for DirectoryService {
    async fn list_courses(&self) -> Result<Vec<Course>, Error> {
        self.store
            .courses
            .list_all()
            .await
            .map_err(map_store_error)
    }

    async fn find_course(&self, course_code: &str) -> Result<Option<Course>, Error> {
        find_course(self.store.courses.as_ref(), course_code).await
    }

    async fn list_students(&self) -> Result<Vec<Student>, Error> {
        self.store
            .students
            .list_all()
            .await
            .map_err(map_store_error)
    }

    async fn list_lecturers_with_courses(&self) -> Result<Vec<LecturerCourses>, Error> {
        let lecturers = self
            .store
            .lecturers
            .list_all()
            .await
            .map_err(map_store_error)?;

        let mut listing = Vec::with_capacity(lecturers.len());
        for lecturer in lecturers.into_iter().filter(|l| !l.is_administrator()) {
            let courses = self
                .store
                .courses
                .list_for_lecturer(lecturer.id)
                .await
                .map_err(map_store_error)?;
            listing.push(LecturerCourses { lecturer, courses });
        }
        Ok(listing)
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
