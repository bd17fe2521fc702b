//! End-to-end HTTP flows over the in-memory store.
//!
//! The app is assembled the way the server binary does it, minus the
//! database: seeded roster, `Trace` middleware and the `/api` scope.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use attendance::Trace;
use attendance::domain::ports::{
    PlaintextCredentialVerifier, SequenceCodeGenerator, StorePorts,
};
use attendance::domain::{AttendanceCode, RedemptionPolicy, RosterSeeder, TRACE_ID_HEADER};
use attendance::inbound::http::configure;
use attendance::inbound::http::state::{HttpState, ServiceDependencies};
use attendance::outbound::memory::InMemoryStore;
use serde_json::{Value, json};

async fn seeded_state() -> web::Data<HttpState> {
    let store = StorePorts::from_shared(Arc::new(InMemoryStore::new()));
    let verifier = Arc::new(PlaintextCredentialVerifier);
    RosterSeeder::new(store.clone(), verifier.clone())
        .seed_if_empty()
        .await
        .expect("roster seed should succeed");
    let code = AttendanceCode::parse("AB12CD").expect("valid code");
    web::Data::new(HttpState::from_store(
        store,
        ServiceDependencies {
            generator: Arc::new(SequenceCodeGenerator::new(vec![code])),
            clock: Arc::new(mockable::DefaultClock),
            verifier,
            policy: RedemptionPolicy::default(),
        },
    ))
}

macro_rules! seeded_app {
    () => {
        actix_test::init_service(
            App::new()
                .app_data(seeded_state().await)
                .wrap(Trace)
                .service(web::scope("/api").configure(configure)),
        )
        .await
    };
}

async fn post_json<S>(app: &S, uri: &str, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

async fn get_json<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::get().uri(uri).to_request();
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

#[actix_web::test]
async fn lecturer_issues_and_student_redeems_a_code() {
    let app = seeded_app!();

    let (status, login) = post_json(
        &app,
        "/api/lecturer/login",
        json!({ "username": "nur", "password": "password" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["success"], true);
    let lecturer_id = login["user"]["id"].as_i64().expect("lecturer id");
    assert_eq!(login["user"]["courses"][0]["code"], "OSD-001");

    let (_, student) = post_json(
        &app,
        "/api/student/login",
        json!({ "studentId": "s-001", "password": "100-S" }),
    )
    .await;
    assert_eq!(student["student"]["student_id"], "S-001");
    let student_db_id = student["student"]["id"].as_i64().expect("student id");

    let (_, enrolled) = post_json(
        &app,
        "/api/student/enroll-course",
        json!({ "studentDbId": student_db_id, "courseCode": "OSD-001" }),
    )
    .await;
    assert_eq!(enrolled["success"], true);
    assert_eq!(enrolled["enrolledCourse"]["lecturer"], "Sir Nur");

    let (_, issued) = post_json(
        &app,
        "/api/lecturer/generate-code",
        json!({ "courseCode": "OSD-001", "lecturerId": lecturer_id }),
    )
    .await;
    assert_eq!(issued, json!({ "success": true, "code": "AB12CD" }));

    let (_, current) = get_json(&app, "/api/lecturer/current-code/osd-001").await;
    assert_eq!(current["code"], "AB12CD");
    assert!(current["timestamp"].is_string());

    let submission = json!({
        "studentId": "S-001",
        "courseCode": "OSD-001",
        "attendanceCode": "ab12cd",
    });
    let (status, accepted) = post_json(&app, "/api/attendance", submission.clone()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(accepted["success"], true);
    assert_eq!(
        accepted["message"],
        "Valid Absence for Alice Johnson, Good Luck for Your Class!"
    );

    let (status, repeat) = post_json(&app, "/api/attendance", submission).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(repeat["success"], false);
    assert_eq!(repeat["code"], "conflict");
    assert_eq!(
        repeat["message"],
        "You have already marked attendance for this class"
    );
    assert!(repeat["traceId"].is_string());

    let (_, report) = get_json(&app, "/api/lecturer/attendance/OSD-001").await;
    let records = report["records"].as_array().expect("records array");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["studentName"], "Alice Johnson");
    assert!(records[0]["timestamp"].is_i64());
}

#[actix_web::test]
async fn lecturers_cannot_issue_codes_for_other_courses() {
    let app = seeded_app!();
    let (_, login) = post_json(
        &app,
        "/api/lecturer/login",
        json!({ "username": "rikip", "password": "password" }),
    )
    .await;
    let lecturer_id = login["user"]["id"].as_i64().expect("lecturer id");

    let (status, body) = post_json(
        &app,
        "/api/lecturer/generate-code",
        json!({ "courseCode": "OSD-001", "lecturerId": lecturer_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(
        body["message"],
        "Unauthorized access to this course or course not found"
    );
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = seeded_app!();
    let request = actix_test::TestRequest::post()
        .uri("/api/attendance")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"studentId\": ")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn non_numeric_path_ids_are_bad_requests() {
    let app = seeded_app!();
    let (status, body) = get_json(&app, "/api/student/enrollments/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid path parameter.");
}

#[actix_web::test]
async fn responses_echo_a_trace_id() {
    let app = seeded_app!();
    let request = actix_test::TestRequest::get().uri("/api/courses").to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courses"].as_array().map(Vec::len), Some(4));
}
