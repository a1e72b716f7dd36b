//! Shared validation helpers for inbound HTTP adapters.
//!
//! Request bodies deserialize into `Option` fields so a missing value yields
//! the endpoint's own message instead of a generic body error. Every
//! validation failure carries `details { field, code }`, plus the offending
//! `value` where echoing it is harmless.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, DomainNameValidationError, EmailValidationError, Error,
    PageValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
    InvalidDomainName,
    InvalidSlug,
    InvalidEmail,
    PasswordTooShort,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidDomainName => "invalid_domain_name",
            ErrorCode::InvalidSlug => "invalid_slug",
            ErrorCode::InvalidEmail => "invalid_email",
            ErrorCode::PasswordTooShort => "password_too_short",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: &'static str,
    message: String,
}

impl ValidationError {
    fn new(field: FieldName, message: impl Into<String>) -> Self {
        Self {
            field: field.as_str(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName, message: &str) -> Error {
    ValidationError::new(field, message).with_code(ErrorCode::MissingField)
}

/// Unwrap a field that must be present and not blank.
pub(crate) fn require_text(
    value: Option<String>,
    field: FieldName,
    message: &str,
) -> Result<String, Error> {
    value
        .filter(|raw| !raw.trim().is_empty())
        .ok_or_else(|| missing_field_error(field, message))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    ValidationError::new(field, format!("{name} must be a valid UUID"))
        .with_value(ErrorCode::InvalidUuid, value)
}

/// Parse one of the UUID-backed identifier newtypes.
pub(crate) fn parse_id<T: FromStr>(value: &str, field: FieldName) -> Result<T, Error> {
    value
        .parse()
        .map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn domain_name_error(field: FieldName, err: DomainNameValidationError) -> Error {
    let code = match err {
        DomainNameValidationError::Empty => ErrorCode::MissingField,
        _ => ErrorCode::InvalidDomainName,
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

pub(crate) fn page_field_error(err: PageValidationError) -> Error {
    let (field, code) = match err {
        PageValidationError::EmptyTitle => (FieldName::new("title"), ErrorCode::MissingField),
        PageValidationError::EmptySlug => (FieldName::new("slug"), ErrorCode::MissingField),
        PageValidationError::InvalidSlug => (FieldName::new("slug"), ErrorCode::InvalidSlug),
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

pub(crate) fn email_error(field: FieldName, err: EmailValidationError) -> Error {
    let code = match err {
        EmailValidationError::Empty => ErrorCode::MissingField,
        _ => ErrorCode::InvalidEmail,
    };
    ValidationError::new(field, err.to_string()).with_code(code)
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    match err {
        CredentialsValidationError::Email(inner) => email_error(FieldName::new("email"), inner),
        CredentialsValidationError::PasswordTooShort { .. } => {
            ValidationError::new(FieldName::new("password"), err.to_string())
                .with_code(ErrorCode::PasswordTooShort)
        }
    }
}
