//! Tests for the account service.

use std::sync::Arc;

use rstest::rstest;
use zeroize::Zeroizing;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::PlaintextCredentialVerifier;
use crate::test_support::store::{MockStore, course, lecturer, student};

fn service(store: MockStore) -> AccountService {
    AccountService::new(store.into_ports(), Arc::new(PlaintextCredentialVerifier))
}

fn credentials(identifier: &str, password: &str) -> LoginCredentials {
    LoginCredentials::try_from_parts(identifier, password).expect("valid credentials")
}

fn change(old: &str, new: &str) -> PasswordChangeRequest {
    PasswordChangeRequest {
        student_id: "s-001".to_owned(),
        old_password: Zeroizing::new(old.to_owned()),
        new_password: Zeroizing::new(new.to_owned()),
    }
}

fn store_with_alice() -> MockStore {
    let mut store = MockStore::default();
    store
        .students
        .expect_find_by_public_id()
        .withf(|id| id.as_str() == "S-001")
        .return_once(|_| Ok(Some(student(11, "S-001", "Alice Johnson"))));
    store
}

#[rstest]
#[tokio::test]
async fn student_login_uppercases_identifier() {
    let found = service(store_with_alice())
        .student_login(&credentials("s-001", "100-S"))
        .await
        .expect("signed in");

    assert_eq!(found.name, "Alice Johnson");
}

#[rstest]
#[tokio::test]
async fn student_login_rejects_wrong_password() {
    let error = service(store_with_alice())
        .student_login(&credentials("S-001", "100-s"))
        .await
        .expect_err("rejected");

    assert_eq!(error.code(), ErrorCode::Unauthorized);
    assert_eq!(error.message(), "Invalid Student ID or password.");
}

#[rstest]
#[tokio::test]
async fn student_login_rejects_unknown_student() {
    let mut store = MockStore::default();
    store
        .students
        .expect_find_by_public_id()
        .return_once(|_| Ok(None));

    let error = service(store)
        .student_login(&credentials("S-404", "404-S"))
        .await
        .expect_err("rejected");

    assert_eq!(error.message(), "Invalid Student ID or password.");
}

#[rstest]
#[tokio::test]
async fn lecturer_login_lists_owned_courses() {
    let mut store = MockStore::default();
    store
        .lecturers
        .expect_find_by_username()
        .withf(|username| username.as_str() == "nur")
        .return_once(|_| Ok(Some(lecturer(1, "nur", "Sir Nur"))));
    store
        .courses
        .expect_list_for_lecturer()
        .return_once(|_| Ok(vec![course(1, "OSD-001", Some(1))]));

    let signed_in = service(store)
        .lecturer_login(&credentials("NUR", "password"))
        .await
        .expect("signed in");

    assert_eq!(signed_in.lecturer.name, "Sir Nur");
    assert_eq!(signed_in.courses.len(), 1);
}

#[rstest]
#[tokio::test]
async fn administrator_login_has_no_courses() {
    let mut store = MockStore::default();
    store
        .lecturers
        .expect_find_by_username()
        .return_once(|_| Ok(Some(lecturer(5, "admin", "Administrator"))));
    store.courses.expect_list_for_lecturer().times(0);

    let signed_in = service(store)
        .lecturer_login(&credentials("admin", "password"))
        .await
        .expect("signed in");

    assert!(signed_in.lecturer.is_administrator());
    assert!(signed_in.courses.is_empty());
}

#[rstest]
#[tokio::test]
async fn lecturer_login_rejects_bad_password() {
    let mut store = MockStore::default();
    store
        .lecturers
        .expect_find_by_username()
        .return_once(|_| Ok(Some(lecturer(1, "nur", "Sir Nur"))));

    let error = service(store)
        .lecturer_login(&credentials("nur", "hunter2"))
        .await
        .expect_err("rejected");

    assert_eq!(error.message(), "Invalid credentials");
}

#[rstest]
#[tokio::test]
async fn password_change_replaces_material() {
    let mut store = store_with_alice();
    store
        .students
        .expect_update_password()
        .withf(|id, password| id.get() == 11 && password.expose() == "n3w-pass")
        .times(1)
        .return_once(|_, _| Ok(true));

    service(store)
        .change_student_password(&change("100-S", "n3w-pass"))
        .await
        .expect("password changed");
}

#[rstest]
#[tokio::test]
async fn password_change_checks_old_password() {
    let mut store = store_with_alice();
    store.students.expect_update_password().times(0);

    let error = service(store)
        .change_student_password(&change("wrong", "n3w-pass"))
        .await
        .expect_err("rejected");

    assert_eq!(error.message(), "Incorrect old password.");
}

#[rstest]
#[tokio::test]
async fn password_change_for_unknown_student() {
    let mut store = MockStore::default();
    store
        .students
        .expect_find_by_public_id()
        .return_once(|_| Ok(None));

    let error = service(store)
        .change_student_password(&change("100-S", "n3w-pass"))
        .await
        .expect_err("missing");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "Student not found.");
}
