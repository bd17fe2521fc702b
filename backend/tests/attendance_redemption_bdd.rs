//! Behaviour tests for issuing and redeeming attendance codes.
//!
//! Scenarios drive the domain services through their driving ports over the
//! in-memory store, seeded with the built-in roster, while a hand-moved
//! clock stands in for wall time.

use std::cell::RefCell;
use std::sync::{Arc, Mutex, PoisonError};

use attendance::domain::ports::{
    AttendanceCodeCommand as _, AttendanceCodeQuery as _, AttendanceCommand as _,
    AttendanceQuery as _, EnrollmentCommand as _, EnrollmentRequest, IssueCodeRequest,
    LecturerRepository as _, PlaintextCredentialVerifier, RedemptionRequest,
    SequenceCodeGenerator, StorePorts, StudentRepository as _,
};
use attendance::domain::{
    AttendanceCode, CodeIssueOutcome, CurrentCodeOutcome, EnrollmentOutcome, RedemptionOutcome,
    RedemptionPolicy, RosterSeeder, StudentPublicId, Username,
};
use attendance::inbound::http::state::{HttpState, ServiceDependencies};
use attendance::outbound::memory::InMemoryStore;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::Runtime;

struct StepClock(Mutex<DateTime<Utc>>);

impl StepClock {
    fn starting_at(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    fn advance(&self, delta: TimeDelta) {
        let mut now = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }
}

impl Clock for StepClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

struct Harness {
    store: StorePorts,
    state: HttpState,
}

struct RedemptionWorld {
    runtime: Runtime,
    clock: Arc<StepClock>,
    harness: RefCell<Option<Harness>>,
    issue: RefCell<Option<CodeIssueOutcome>>,
    redemption: RefCell<Option<RedemptionOutcome>>,
    enrollment: RefCell<Option<EnrollmentOutcome>>,
}

impl RedemptionWorld {
    fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
            .single()
            .expect("valid start instant");
        Self {
            runtime: Runtime::new().expect("tokio runtime should initialize"),
            clock: Arc::new(StepClock::starting_at(start)),
            harness: RefCell::new(None),
            issue: RefCell::new(None),
            redemption: RefCell::new(None),
            enrollment: RefCell::new(None),
        }
    }

    fn seed(&self, next_codes: &[&str]) {
        let codes = next_codes
            .iter()
            .map(|code| AttendanceCode::parse(code).expect("feature code should be valid"))
            .collect();
        let store = StorePorts::from_shared(Arc::new(InMemoryStore::new()));
        let verifier = Arc::new(PlaintextCredentialVerifier);
        let summary = self
            .runtime
            .block_on(RosterSeeder::new(store.clone(), verifier.clone()).seed_if_empty())
            .expect("roster seed should succeed");
        assert!(!summary.is_empty(), "seed should write the roster");

        let state = HttpState::from_store(
            store.clone(),
            ServiceDependencies {
                generator: Arc::new(SequenceCodeGenerator::new(codes)),
                clock: self.clock.clone(),
                verifier,
                policy: RedemptionPolicy::default(),
            },
        );
        *self.harness.borrow_mut() = Some(Harness { store, state });
    }

    fn with_harness<T>(&self, f: impl FnOnce(&Harness) -> T) -> T {
        let harness = self.harness.borrow();
        f(harness.as_ref().expect("roster should be seeded first"))
    }

    fn enroll(&self, student: &str, course: &str) -> EnrollmentOutcome {
        let public_id = StudentPublicId::parse(student).expect("valid student id");
        self.with_harness(|harness| {
            self.runtime.block_on(async {
                let found = harness
                    .store
                    .students
                    .find_by_public_id(&public_id)
                    .await
                    .expect("student lookup should succeed")
                    .expect("student should be seeded");
                let request = EnrollmentRequest {
                    student_id: found.id,
                    course_code: course.to_owned(),
                };
                harness
                    .state
                    .enrollment
                    .enroll(&request)
                    .await
                    .expect("enroll should not fail")
            })
        })
    }

    fn redemption(&self) -> RedemptionOutcome {
        self.redemption
            .borrow()
            .clone()
            .expect("a code should have been submitted")
    }
}

#[fixture]
fn world() -> RedemptionWorld {
    RedemptionWorld::new()
}

#[given("a seeded roster whose next attendance code is {code}")]
fn a_seeded_roster(world: &RedemptionWorld, code: String) {
    world.seed(&[code.as_str()]);
}

#[given("a seeded roster whose next attendance codes are {first} then {second}")]
fn a_seeded_roster_with_two_codes(world: &RedemptionWorld, first: String, second: String) {
    world.seed(&[first.as_str(), second.as_str()]);
}

#[given("student {student} is enrolled in {course}")]
fn student_is_enrolled(world: &RedemptionWorld, student: String, course: String) {
    let outcome = world.enroll(&student, &course);
    assert!(
        matches!(outcome, EnrollmentOutcome::Enrolled(_)),
        "expected enrollment, got {outcome:?}"
    );
}

#[when("lecturer {username} issues a code for {course}")]
fn lecturer_issues_code(world: &RedemptionWorld, username: String, course: String) {
    let username = Username::parse(&username).expect("valid username");
    let outcome = world.with_harness(|harness| {
        world.runtime.block_on(async {
            let lecturer = harness
                .store
                .lecturers
                .find_by_username(&username)
                .await
                .expect("lecturer lookup should succeed")
                .expect("lecturer should be seeded");
            let request = IssueCodeRequest {
                course_code: course,
                lecturer_id: lecturer.id,
            };
            harness
                .state
                .codes
                .issue_code(&request)
                .await
                .expect("issue should not fail")
        })
    });
    *world.issue.borrow_mut() = Some(outcome);
}

#[when("{minutes} minutes pass")]
fn minutes_pass(world: &RedemptionWorld, minutes: i64) {
    world.clock.advance(TimeDelta::minutes(minutes));
}

#[when("student {student} submits {code} for {course}")]
fn student_submits_code(world: &RedemptionWorld, student: String, code: String, course: String) {
    let request = RedemptionRequest {
        student_id: student,
        course_code: course,
        submitted_code: code,
    };
    let outcome = world.with_harness(|harness| {
        world
            .runtime
            .block_on(harness.state.attendance.redeem(&request))
            .expect("redeem should not fail")
    });
    *world.redemption.borrow_mut() = Some(outcome);
}

#[when("student {student} enrolls in {course}")]
fn student_enrolls(world: &RedemptionWorld, student: String, course: String) {
    let outcome = world.enroll(&student, &course);
    *world.enrollment.borrow_mut() = Some(outcome);
}

#[then("the redemption is accepted for {name}")]
fn redemption_is_accepted(world: &RedemptionWorld, name: String) {
    match world.redemption() {
        RedemptionOutcome::Accepted {
            student_name,
            recorded_at,
        } => {
            assert_eq!(student_name, name);
            assert_eq!(recorded_at, world.clock.utc());
        }
        RedemptionOutcome::Rejected(rejection) => {
            panic!("expected acceptance, got {rejection:?}")
        }
    }
}

#[then("the redemption is rejected with \"{message}\"")]
fn redemption_is_rejected(world: &RedemptionWorld, message: String) {
    let outcome = world.redemption();
    assert!(!outcome.is_accepted(), "expected a rejection");
    assert_eq!(outcome.message(), message);
}

#[then("the number of attendance records for {course} is {count}")]
fn attendance_record_count(world: &RedemptionWorld, course: String, count: usize) {
    let report = world.with_harness(|harness| {
        world
            .runtime
            .block_on(harness.state.attendance_query.course_attendance(&course))
            .expect("report should load")
            .expect("course should exist")
    });
    assert_eq!(report.entries.len(), count);
}

#[then("the code issue is refused")]
fn code_issue_is_refused(world: &RedemptionWorld) {
    let outcome = world.issue.borrow().clone();
    assert_eq!(outcome, Some(CodeIssueOutcome::Unauthorized));
}

#[then("{course} has no active code")]
fn course_has_no_active_code(world: &RedemptionWorld, course: String) {
    let outcome = world.with_harness(|harness| {
        world
            .runtime
            .block_on(harness.state.codes_query.current_code(&course))
            .expect("current code should load")
    });
    assert_eq!(outcome, CurrentCodeOutcome::NoActiveCode);
}

#[then("the current code for {course} is {code}")]
fn current_code_is(world: &RedemptionWorld, course: String, code: String) {
    let outcome = world.with_harness(|harness| {
        world
            .runtime
            .block_on(harness.state.codes_query.current_code(&course))
            .expect("current code should load")
    });
    let CurrentCodeOutcome::Active(issued) = outcome else {
        panic!("expected an active code, got {outcome:?}");
    };
    assert_eq!(issued.code.as_str(), code);
}

#[then("the enrollment is rejected with \"{message}\"")]
fn enrollment_is_rejected(world: &RedemptionWorld, message: String) {
    let outcome = world
        .enrollment
        .borrow()
        .clone()
        .expect("an enrollment should have been attempted");
    assert!(matches!(outcome, EnrollmentOutcome::Rejected(_)));
    assert_eq!(outcome.message(), message);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "A code is redeemed once inside its validity window"
)]
fn code_redeemed_once(world: RedemptionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "A fresh code does not allow a second redemption"
)]
fn fresh_code_after_redemption_refused(world: RedemptionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "A code is still valid exactly one hour after issue"
)]
fn code_valid_at_boundary(world: RedemptionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "Students outside the course cannot redeem its code"
)]
fn unenrolled_student_refused(world: RedemptionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "Lecturers cannot issue codes for courses they do not own"
)]
fn foreign_course_issue_refused(world: RedemptionWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/attendance_redemption.feature",
    name = "Enrolling twice in the same course is refused"
)]
fn double_enrollment_refused(world: RedemptionWorld) {
    drop(world);
}
