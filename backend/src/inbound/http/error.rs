//! Rendering of [`Error`] as JSON responses.
//!
//! The status comes from the error code and the trace id is echoed as a
//! header. Internal and unavailable errors get a generic message; debug
//! builds keep the original under `details.cause`.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{error, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Handler result; the error side renders through [`ResponseError`].
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Client-facing replacement for messages that may carry adapter detail.
fn generic_message(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::InternalError => Some("Internal server error"),
        ErrorCode::ServiceUnavailable => Some("Service temporarily unavailable"),
        _ => None,
    }
}

fn redact(error: &Error, expose_cause: bool) -> Error {
    let Some(message) = generic_message(error.code()) else {
        return error.clone();
    };
    let mut redacted = Error::new(error.code(), message);
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    if expose_cause {
        redacted = redacted.with_details(json!({ "cause": error.message() }));
    }
    redacted
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        match self.code() {
            ErrorCode::InternalError => {
                error!(cause = self.message(), trace_id = ?self.trace_id(), "request failed");
            }
            ErrorCode::ServiceUnavailable => {
                warn!(cause = self.message(), trace_id = ?self.trace_id(), "dependency unavailable");
            }
            _ => {}
        }
        let body = redact(self, cfg!(debug_assertions));
        let mut response = HttpResponse::build(self.status_code());
        if let Some(trace_id) = body.trace_id() {
            response.insert_header((TRACE_ID_HEADER, trace_id.to_owned()));
        }
        response.json(body)
    }
}

/// `JsonConfig` error handler: malformed or mistyped bodies become
/// `400 Invalid request body`.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, "rejected request body");
    Error::invalid_request("Invalid request body").into()
}
