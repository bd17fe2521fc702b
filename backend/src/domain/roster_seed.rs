//! Start-up roster seeding.
//!
//! Fills the record store with the initial lecturers, courses and students.
//! Each table is checked separately, so a store whose students were all
//! deleted gets the seeded students back while its lecturers stay as they
//! are.

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::domain::ports::{CredentialVerifier, RecordStoreError, StorePorts};
use crate::domain::{
    CourseCode, CourseCodeError, NewCourse, NewLecturer, NewStudent, StudentPublicId,
    StudentPublicIdError, Username, UsernameError,
};

/// Password given to every seeded lecturer.
pub const SEED_LECTURER_PASSWORD: &str = "password";

/// `(username, display name)` pairs.
const LECTURERS: &[(&str, &str)] = &[
    ("nur", "Sir Nur"),
    ("rikip", "Sir Rikip"),
    ("fadhil", "Sir Fadhil"),
    ("mark", "Sir Mark"),
    ("admin", "Administrator"),
];

/// `(code, name, owner username)` triples.
const COURSES: &[(&str, &str, &str)] = &[
    ("OSD-001", "Operating System Design", "nur"),
    ("FLA-002", "Formal Language and Automata", "rikip"),
    ("DPS-003", "Data Processing and Storage", "fadhil"),
    ("PE-004", "Physical Education", "mark"),
];

/// `(public id, display name)` pairs.
const STUDENTS: &[(&str, &str)] = &[("S-001", "Alice Johnson"), ("S-002", "Bob Smith")];

/// Counts of rows written by a seeding run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    /// Lecturers created.
    pub lecturers: usize,
    /// Courses created.
    pub courses: usize,
    /// Students created.
    pub students: usize,
}

impl SeedSummary {
    /// Whether the run wrote nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lecturers == 0 && self.courses == 0 && self.students == 0
    }
}

/// Errors raised while seeding the roster.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The record store failed.
    #[error("roster seeding store error: {0}")]
    Store(#[from] RecordStoreError),
    /// A seeded username failed validation.
    #[error("seeded username is invalid: {0}")]
    Username(#[from] UsernameError),
    /// A seeded course code failed validation.
    #[error("seeded course code is invalid: {0}")]
    CourseCode(#[from] CourseCodeError),
    /// A seeded student identifier failed validation.
    #[error("seeded student id is invalid: {0}")]
    StudentId(#[from] StudentPublicIdError),
}

/// Seeds the initial roster into empty tables.
#[derive(Clone)]
pub struct RosterSeeder {
    store: StorePorts,
    verifier: Arc<dyn CredentialVerifier>,
}

impl RosterSeeder {
    /// Create a seeder over the store bundle.
    pub fn new(store: StorePorts, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self { store, verifier }
    }

    /// Seed lecturers, courses and students, each only when its own table
    /// is empty.
    ///
    /// Seeded courses are owned by the seeded lecturer of the same username
    /// when one exists and are left unassigned otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] when the store fails or the built-in roster is
    /// malformed.
    pub async fn seed_if_empty(&self) -> Result<SeedSummary, SeedError> {
        let summary = SeedSummary {
            lecturers: self.seed_lecturers().await?,
            courses: self.seed_courses().await?,
            students: self.seed_students().await?,
        };
        if summary.is_empty() {
            info!("record store already populated; skipping roster seed");
        } else {
            info!(
                lecturers = summary.lecturers,
                courses = summary.courses,
                students = summary.students,
                "roster seeded"
            );
        }
        Ok(summary)
    }

    async fn seed_lecturers(&self) -> Result<usize, SeedError> {
        if !self.store.lecturers.list_all().await?.is_empty() {
            return Ok(0);
        }
        let mut created = 0;
        for (username, name) in LECTURERS {
            let new_lecturer = NewLecturer {
                username: Username::parse(username)?,
                name: (*name).to_owned(),
                password: self.verifier.seal(SEED_LECTURER_PASSWORD),
            };
            if self.store.lecturers.create(&new_lecturer).await?.inserted().is_some() {
                created += 1;
            }
        }
        Ok(created)
    }

    async fn seed_courses(&self) -> Result<usize, SeedError> {
        if !self.store.courses.list_all().await?.is_empty() {
            return Ok(0);
        }
        let mut created = 0;
        for (code, name, owner) in COURSES {
            let owner = Username::parse(owner)?;
            let new_course = NewCourse {
                code: CourseCode::parse(code)?,
                name: (*name).to_owned(),
                lecturer_id: self
                    .store
                    .lecturers
                    .find_by_username(&owner)
                    .await?
                    .map(|lecturer| lecturer.id),
            };
            if self.store.courses.create(&new_course).await?.inserted().is_some() {
                created += 1;
            }
        }
        Ok(created)
    }

    async fn seed_students(&self) -> Result<usize, SeedError> {
        if !self.store.students.list_all().await?.is_empty() {
            return Ok(0);
        }
        let mut created = 0;
        for (public_id, name) in STUDENTS {
            let public_id = StudentPublicId::parse(public_id)?;
            let new_student = NewStudent {
                password: self.verifier.seal(&public_id.default_password()),
                public_id,
                name: (*name).to_owned(),
            };
            if self.store.students.create(&new_student).await?.inserted().is_some() {
                created += 1;
            }
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for roster seeding.

    use super::*;
    use crate::domain::ports::{InsertOutcome, PlaintextCredentialVerifier};
    use crate::domain::{Course, CourseId, Lecturer, LecturerId, Student, StudentId};
    use crate::test_support::store::{MockStore, course, lecturer, student};
    use rstest::rstest;

    fn seeder(store: MockStore) -> RosterSeeder {
        RosterSeeder::new(store.into_ports(), Arc::new(PlaintextCredentialVerifier))
    }

    fn created_lecturer(new: &NewLecturer) -> Lecturer {
        Lecturer {
            id: LecturerId::new(1),
            username: new.username.clone(),
            name: new.name.clone(),
            password: new.password.clone(),
        }
    }

    fn created_course(new: &NewCourse) -> Course {
        Course {
            id: CourseId::new(1),
            code: new.code.clone(),
            name: new.name.clone(),
            lecturer_id: new.lecturer_id,
        }
    }

    fn created_student(new: &NewStudent) -> Student {
        Student {
            id: StudentId::new(1),
            public_id: new.public_id.clone(),
            name: new.name.clone(),
            password: new.password.clone(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn populated_store_is_left_alone() {
        let mut store = MockStore::default();
        store
            .lecturers
            .expect_list_all()
            .return_once(|| Ok(vec![lecturer(1, "nur", "Sir Nur")]));
        store
            .courses
            .expect_list_all()
            .return_once(|| Ok(vec![course(1, "OSD-001", Some(1))]));
        store
            .students
            .expect_list_all()
            .return_once(|| Ok(vec![student(1, "S-001", "Alice Johnson")]));
        store.lecturers.expect_create().times(0);
        store.courses.expect_create().times(0);
        store.students.expect_create().times(0);

        let summary = seeder(store).seed_if_empty().await.expect("seed");

        assert!(summary.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn empty_store_receives_full_roster() {
        let mut store = MockStore::default();
        store.lecturers.expect_list_all().return_once(|| Ok(Vec::new()));
        store.courses.expect_list_all().return_once(|| Ok(Vec::new()));
        store.students.expect_list_all().return_once(|| Ok(Vec::new()));
        store
            .lecturers
            .expect_create()
            .times(5)
            .returning(|new| Ok(InsertOutcome::Inserted(created_lecturer(new))));
        store
            .lecturers
            .expect_find_by_username()
            .times(4)
            .returning(|username| Ok(Some(lecturer(7, username.as_str(), "Owner"))));
        store
            .courses
            .expect_create()
            .withf(|new| new.lecturer_id == Some(LecturerId::new(7)))
            .times(4)
            .returning(|new| Ok(InsertOutcome::Inserted(created_course(new))));
        store
            .students
            .expect_create()
            .times(2)
            .returning(|new| Ok(InsertOutcome::Inserted(created_student(new))));

        let summary = seeder(store).seed_if_empty().await.expect("seed");

        assert_eq!(
            summary,
            SeedSummary {
                lecturers: 5,
                courses: 4,
                students: 2,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn only_empty_tables_are_seeded() {
        let mut store = MockStore::default();
        store
            .lecturers
            .expect_list_all()
            .return_once(|| Ok(vec![lecturer(1, "nur", "Sir Nur")]));
        store
            .courses
            .expect_list_all()
            .return_once(|| Ok(vec![course(1, "OSD-001", Some(1))]));
        store.students.expect_list_all().return_once(|| Ok(Vec::new()));
        store.lecturers.expect_create().times(0);
        store.courses.expect_create().times(0);
        store
            .students
            .expect_create()
            .times(2)
            .returning(|new| Ok(InsertOutcome::Inserted(created_student(new))));

        let summary = seeder(store).seed_if_empty().await.expect("seed");

        assert_eq!(
            summary,
            SeedSummary {
                lecturers: 0,
                courses: 0,
                students: 2,
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn courses_without_a_seeded_owner_are_unassigned() {
        let mut store = MockStore::default();
        store
            .lecturers
            .expect_list_all()
            .return_once(|| Ok(vec![lecturer(9, "someone", "Someone Else")]));
        store.courses.expect_list_all().return_once(|| Ok(Vec::new()));
        store
            .students
            .expect_list_all()
            .return_once(|| Ok(vec![student(1, "S-001", "Alice Johnson")]));
        store
            .lecturers
            .expect_find_by_username()
            .times(4)
            .returning(|_| Ok(None));
        store
            .courses
            .expect_create()
            .withf(|new| new.lecturer_id.is_none())
            .times(4)
            .returning(|new| Ok(InsertOutcome::Inserted(created_course(new))));

        let summary = seeder(store).seed_if_empty().await.expect("seed");

        assert_eq!(summary.courses, 4);
    }

    #[rstest]
    #[tokio::test]
    async fn seeded_students_get_reversed_passwords() {
        let mut store = MockStore::default();
        store
            .lecturers
            .expect_list_all()
            .return_once(|| Ok(vec![lecturer(1, "nur", "Sir Nur")]));
        store
            .courses
            .expect_list_all()
            .return_once(|| Ok(vec![course(1, "OSD-001", Some(1))]));
        store.students.expect_list_all().return_once(|| Ok(Vec::new()));
        store
            .students
            .expect_create()
            .withf(|new| new.password.expose() == new.public_id.default_password())
            .times(2)
            .returning(|_| Ok(InsertOutcome::AlreadyPresent));

        let summary = seeder(store).seed_if_empty().await.expect("seed");

        assert_eq!(summary.students, 0);
    }
}
