//! HTTP rendering of domain errors.
//!
//! Every failure is answered with the same envelope,
//! `{success:false, message, code, traceId}`. Business refusals keep HTTP 200
//! so clients branch on `success`; malformed requests are 400; store and
//! server faults are 500 with the message redacted to "Server error".

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

/// Message shown for every fault the client cannot act on.
pub const SERVER_ERROR_MESSAGE: &str = "Server error";

/// Failure payload shared by all endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`.
    pub success: bool,
    /// User-facing message.
    pub message: String,
    /// Machine-readable failure category.
    pub code: ErrorCode,
    /// Request correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Structured context, when available.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub details: Option<Value>,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::ServiceUnavailable | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => StatusCode::OK,
    }
}

fn envelope_for(error: &Error) -> ErrorEnvelope {
    let trace_id = error.trace_id().map(str::to_owned);
    if error.code().is_business_outcome() {
        ErrorEnvelope {
            success: false,
            message: error.message().to_owned(),
            code: error.code(),
            trace_id,
            details: error.details().cloned(),
        }
    } else {
        ErrorEnvelope {
            success: false,
            message: SERVER_ERROR_MESSAGE.to_owned(),
            code: error.code(),
            trace_id,
            details: None,
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if !self.code().is_business_outcome() {
            error!(
                code = ?self.code(),
                message = self.message(),
                trace_id = self.trace_id(),
                "request failed"
            );
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(envelope_for(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("actix error")
    }
}

/// Render unreadable JSON bodies as 400 responses in the common envelope.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    Error::invalid_request("Request body is missing required fields.")
        .with_details(json!({ "reason": detail }))
        .into()
}
