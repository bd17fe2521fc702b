//! Record store helpers shared by the domain services.

use super::ports::{CourseRepository, RecordStoreError, StudentRepository};
use super::{Course, CourseCode, Error, Student, StudentPublicId};

/// Promote a record store failure to an internal-class [`Error`].
///
/// Connection faults become `service_unavailable`; everything else is
/// `internal`. Neither message reaches end users.
pub(crate) fn map_store_error(error: RecordStoreError) -> Error {
    match error {
        RecordStoreError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        RecordStoreError::Query { message } => {
            Error::internal(format!("record store error: {message}"))
        }
    }
}

/// Resolve a raw course code. Codes that fail validation resolve to `None`
/// since no stored course can carry them.
pub(crate) async fn find_course(
    courses: &dyn CourseRepository,
    raw_code: &str,
) -> Result<Option<Course>, Error> {
    let Ok(code) = CourseCode::parse(raw_code) else {
        return Ok(None);
    };
    courses.find_by_code(&code).await.map_err(map_store_error)
}

/// Resolve a raw student public identifier, treating blanks as unknown.
pub(crate) async fn find_student(
    students: &dyn StudentRepository,
    raw_id: &str,
) -> Result<Option<Student>, Error> {
    let Ok(public_id) = StudentPublicId::parse(raw_id) else {
        return Ok(None);
    };
    students
        .find_by_public_id(&public_id)
        .await
        .map_err(map_store_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCourseRepository, MockStudentRepository};
    use rstest::rstest;

    #[rstest]
    #[case(RecordStoreError::connection("pool exhausted"), ErrorCode::ServiceUnavailable)]
    #[case(RecordStoreError::query("syntax error"), ErrorCode::InternalError)]
    fn store_errors_are_never_business_outcomes(
        #[case] error: RecordStoreError,
        #[case] expected: ErrorCode,
    ) {
        let mapped = map_store_error(error);
        assert_eq!(mapped.code(), expected);
        assert!(!mapped.code().is_business_outcome());
    }

    #[tokio::test]
    async fn malformed_course_codes_skip_the_store() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_code().times(0);

        let found = find_course(&courses, "THIS-CODE-IS-TOO-LONG")
            .await
            .expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn blank_student_ids_skip_the_store() {
        let mut students = MockStudentRepository::new();
        students.expect_find_by_public_id().times(0);

        let found = find_student(&students, "   ").await.expect("lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn course_lookup_normalises_case() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_code()
            .withf(|code| code.as_str() == "OSD-001")
            .times(1)
            .return_once(|_| Ok(None));

        find_course(&courses, " osd-001 ").await.expect("lookup succeeds");
    }
}
