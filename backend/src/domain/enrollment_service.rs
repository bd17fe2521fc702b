//! Enrollment gate service.

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    EnrollmentCommand, EnrollmentQuery, EnrollmentRequest, InsertOutcome, StorePorts,
};
use crate::domain::store_access::{find_course, map_store_error};
use crate::domain::{
    Course, CourseId, CourseStudent, EnrolledCourse, EnrollmentListing, EnrollmentOutcome,
    EnrollmentRejection, Error, StudentEnrollment, StudentId,
};

/// Enrolls students in courses and serves enrollment listings.
#[derive(Clone)]
pub struct EnrollmentService {
    store: StorePorts,
}

impl EnrollmentService {
    /// Create the service from the store bundle.
    pub fn new(store: StorePorts) -> Self {
        Self { store }
    }

    async fn lecturer_name(&self, course: &Course) -> Result<Option<String>, Error> {
        let Some(owner) = course.lecturer_id else {
            return Ok(None);
        };
        let lecturer = self
            .store
            .lecturers
            .find_by_id(owner)
            .await
            .map_err(map_store_error)?;
        Ok(lecturer.map(|lecturer| lecturer.name))
    }
}

#[async_trait]
impl EnrollmentCommand for EnrollmentService {
    async fn enroll(&self, request: &EnrollmentRequest) -> Result<EnrollmentOutcome, Error> {
        let student = self
            .store
            .students
            .find_by_id(request.student_id)
            .await
            .map_err(map_store_error)?;
        let Some(student) = student else {
            return Ok(EnrollmentOutcome::Rejected(
                EnrollmentRejection::StudentNotFound,
            ));
        };
        let Some(course) = find_course(self.store.courses.as_ref(), &request.course_code).await?
        else {
            return Ok(EnrollmentOutcome::Rejected(
                EnrollmentRejection::CourseNotFound,
            ));
        };

        let inserted = self
            .store
            .enrollments
            .insert_if_absent(student.id, course.id)
            .await
            .map_err(map_store_error)?;
        if inserted == InsertOutcome::AlreadyPresent {
            return Ok(EnrollmentOutcome::Rejected(
                EnrollmentRejection::AlreadyEnrolled,
            ));
        }

        let lecturer_name = self.lecturer_name(&course).await?;
        info!(
            student_id = %student.public_id,
            course_code = %course.code,
            "student enrolled"
        );
        Ok(EnrollmentOutcome::Enrolled(EnrolledCourse {
            code: course.code,
            name: course.name,
            lecturer_name,
        }))
    }
}

#[async_trait]
impl EnrollmentQuery for EnrollmentService {
    async fn student_enrollments(
        &self,
        student: StudentId,
    ) -> Result<Vec<StudentEnrollment>, Error> {
        self.store
            .enrollments
            .list_for_student(student)
            .await
            .map_err(map_store_error)
    }

    async fn course_students(&self, course: CourseId) -> Result<Vec<CourseStudent>, Error> {
        self.store
            .enrollments
            .list_for_course(course)
            .await
            .map_err(map_store_error)
    }

    async fn all_enrollments(&self) -> Result<Vec<EnrollmentListing>, Error> {
        self.store
            .enrollments
            .list_all()
            .await
            .map_err(map_store_error)
    }
}

#[cfg(test)]
#[path = "enrollment_service_tests.rs"]
mod tests;
