//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::Value;

use crate::domain::ports::{
    AccountCommand, AttendanceCodeCommand, AttendanceCodeQuery, AttendanceCommand,
    AttendanceQuery, DirectoryCommand, DirectoryQuery, EnrollmentCommand, EnrollmentQuery,
    MockAccountCommand, MockAttendanceCodeCommand, MockAttendanceCodeQuery,
    MockAttendanceCommand, MockAttendanceQuery, MockDirectoryCommand, MockDirectoryQuery,
    MockEnrollmentCommand, MockEnrollmentQuery,
};
use crate::inbound::http::configure;
use crate::inbound::http::state::HttpState;

/// Ports to replace in the test state; unset ones become expectation-free
/// mocks that fail the test if called.
#[derive(Default)]
pub struct StateOverrides {
    pub codes: Option<Arc<dyn AttendanceCodeCommand>>,
    pub codes_query: Option<Arc<dyn AttendanceCodeQuery>>,
    pub attendance: Option<Arc<dyn AttendanceCommand>>,
    pub attendance_query: Option<Arc<dyn AttendanceQuery>>,
    pub enrollment: Option<Arc<dyn EnrollmentCommand>>,
    pub enrollment_query: Option<Arc<dyn EnrollmentQuery>>,
    pub directory: Option<Arc<dyn DirectoryCommand>>,
    pub directory_query: Option<Arc<dyn DirectoryQuery>>,
    pub accounts: Option<Arc<dyn AccountCommand>>,
}

impl StateOverrides {
    fn into_state(self) -> HttpState {
        HttpState {
            codes: self
                .codes
                .unwrap_or_else(|| Arc::new(MockAttendanceCodeCommand::new())),
            codes_query: self
                .codes_query
                .unwrap_or_else(|| Arc::new(MockAttendanceCodeQuery::new())),
            attendance: self
                .attendance
                .unwrap_or_else(|| Arc::new(MockAttendanceCommand::new())),
            attendance_query: self
                .attendance_query
                .unwrap_or_else(|| Arc::new(MockAttendanceQuery::new())),
            enrollment: self
                .enrollment
                .unwrap_or_else(|| Arc::new(MockEnrollmentCommand::new())),
            enrollment_query: self
                .enrollment_query
                .unwrap_or_else(|| Arc::new(MockEnrollmentQuery::new())),
            directory: self
                .directory
                .unwrap_or_else(|| Arc::new(MockDirectoryCommand::new())),
            directory_query: self
                .directory_query
                .unwrap_or_else(|| Arc::new(MockDirectoryQuery::new())),
            accounts: self
                .accounts
                .unwrap_or_else(|| Arc::new(MockAccountCommand::new())),
        }
    }
}

/// Build an app serving every `/api` route over the given ports.
pub fn test_app(
    overrides: StateOverrides,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(overrides.into_state()))
        .service(web::scope("/api").configure(configure))
}

/// Call the app and decode the JSON body.
pub async fn read_json<S, B>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    let value = serde_json::from_slice(&body).expect("JSON response body");
    (status, value)
}
