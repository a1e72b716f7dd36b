//! Failure payload shared by every use-case.
//!
//! Services return [`Error`]; adapters decide how it travels (JSON over HTTP
//! today). Nothing here knows about status codes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::TraceId;

/// Failure category. Serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed shape or format checks.
    InvalidRequest,
    /// No usable session.
    Unauthorized,
    /// The caller does not own the target resource.
    Forbidden,
    NotFound,
    /// A uniqueness rule was violated.
    Conflict,
    /// The database or identity service could not be reached.
    ServiceUnavailable,
    InternalError,
}

/// Error returned by services and rendered by adapters.
///
/// The trace id of the enclosing request scope, if any, is captured when
/// the error is built.
///
/// ```
/// use inkpress::domain::{Error, ErrorCode};
///
/// let err = Error::conflict("Domain already exists");
/// assert_eq!(err.code(), ErrorCode::Conflict);
/// assert!(!err.is_internal());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct Error {
    #[schema(example = "conflict")]
    code: ErrorCode,
    #[schema(example = "Domain already exists")]
    message: String,
    /// Same value as the `Trace-Id` response header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "7b1c3f4e-2d6a-4e8b-9c0d-1a2b3c4d5e6f")]
    trace_id: Option<String>,
    /// For validation failures: `{ "field": "slug", "code": "invalid_slug" }`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

macro_rules! constructors {
    ($($name:ident => $code:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Error with [`ErrorCode::", stringify!($code), "`].")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
            details: None,
        }
    }

    constructors! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        internal => InternalError,
    }

    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Whether the message must be hidden from clients.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.code == ErrorCode::InternalError
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        Self {
            trace_id: Some(id.into()),
            ..self
        }
    }

    /// Attach structured context.
    ///
    /// ```
    /// use inkpress::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("Slug is required")
    ///     .with_details(json!({ "field": "slug", "code": "missing_field" }));
    /// assert_eq!(err.details().and_then(|d| d.get("field")), Some(&json!("slug")));
    /// ```
    #[must_use]
    pub fn with_details(self, details: Value) -> Self {
        Self {
            details: Some(details),
            ..self
        }
    }
}
