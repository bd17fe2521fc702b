//! Test utilities for unit tests in `src/`.
//!
//! Only compiled under `cfg(test)`. Integration tests in `tests/` carry
//! their own helpers because this module is invisible to them.

pub mod clock {
    //! Controllable clocks for time-sensitive rules.

    use std::sync::{Mutex, MutexGuard};

    use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Instant most fixtures start from.
    pub fn fixture_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid fixture instant")
    }

    /// Clock whose current instant tests move by hand.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        pub fn advance_ms(&self, millis: i64) {
            *self.lock_clock() += TimeDelta::milliseconds(millis);
        }

        pub fn advance_minutes(&self, minutes: i64) {
            *self.lock_clock() += TimeDelta::minutes(minutes);
        }

        fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}

pub mod store {
    //! Mock bundles and sample entities for service tests.

    use std::sync::Arc;

    use crate::domain::ports::{
        MockAttendanceCodeRepository, MockAttendanceRecordRepository, MockCourseRepository,
        MockEnrollmentRepository, MockLecturerRepository, MockStudentRepository, StorePorts,
    };
    use crate::domain::{
        Course, CourseCode, CourseId, Lecturer, LecturerId, Password, Student, StudentId,
        StudentPublicId, Username,
    };

    /// One mock per repository port. Unconfigured mocks panic when called,
    /// so a test only sets expectations on the ports it means to touch.
    #[derive(Default)]
    pub struct MockStore {
        pub courses: MockCourseRepository,
        pub students: MockStudentRepository,
        pub lecturers: MockLecturerRepository,
        pub enrollments: MockEnrollmentRepository,
        pub codes: MockAttendanceCodeRepository,
        pub records: MockAttendanceRecordRepository,
    }

    impl MockStore {
        pub fn into_ports(self) -> StorePorts {
            StorePorts {
                courses: Arc::new(self.courses),
                students: Arc::new(self.students),
                lecturers: Arc::new(self.lecturers),
                enrollments: Arc::new(self.enrollments),
                codes: Arc::new(self.codes),
                records: Arc::new(self.records),
            }
        }
    }

    pub fn course(id: i32, code: &str, owner: Option<i32>) -> Course {
        Course {
            id: CourseId::new(id),
            code: CourseCode::parse(code).expect("valid course code"),
            name: format!("Course {code}"),
            lecturer_id: owner.map(LecturerId::new),
        }
    }

    pub fn student(id: i32, public_id: &str, name: &str) -> Student {
        let public_id = StudentPublicId::parse(public_id).expect("valid student id");
        Student {
            id: StudentId::new(id),
            password: Password::new(public_id.default_password()),
            public_id,
            name: name.to_owned(),
        }
    }

    pub fn lecturer(id: i32, username: &str, name: &str) -> Lecturer {
        Lecturer {
            id: LecturerId::new(id),
            username: Username::parse(username).expect("valid username"),
            name: name.to_owned(),
            password: Password::new("password"),
        }
    }
}
