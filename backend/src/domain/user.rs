//! Mirrored user records.
//!
//! Users are owned by the identity provider; this service keeps a local row
//! per identity so domains can reference their owner.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::define_uuid_id;

define_uuid_id!(
    /// Stable user identifier, equal to the identity provider's user id.
    UserId,
    "user id"
);

/// Maximum accepted email length (RFC 5321 path limit).
pub const EMAIL_MAX: usize = 254;

/// Validation errors for [`Email`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    #[error("email must not be empty")]
    Empty,
    #[error("email must be at most {max} characters")]
    TooLong { max: usize },
    #[error("email must contain a local part and a domain separated by '@'")]
    Malformed,
}

/// Trimmed email address.
///
/// Only the coarse `local@domain` shape is checked; the identity provider owns
/// deliverability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "ada@example.com")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`].
    ///
    /// # Examples
    /// ```
    /// use inkpress::domain::Email;
    ///
    /// let email = Email::new("  ada@example.com ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(Email::new("ada").is_err());
    /// ```
    pub fn new(raw: impl AsRef<str>) -> Result<Self, EmailValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(EmailValidationError::TooLong { max: EMAIL_MAX });
        }
        match trimmed.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(EmailValidationError::Malformed),
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Local mirror of an identity provider user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    email: Email,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, email: Email) -> Self {
        Self { id, email }
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Email recorded when the user was first mirrored.
    #[must_use]
    pub fn email(&self) -> &Email {
        &self.email
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ada@example.com", Ok("ada@example.com"))]
    #[case("  ada@example.com\n", Ok("ada@example.com"))]
    #[case("   ", Err(EmailValidationError::Empty))]
    #[case("ada", Err(EmailValidationError::Malformed))]
    #[case("@example.com", Err(EmailValidationError::Malformed))]
    #[case("ada@", Err(EmailValidationError::Malformed))]
    #[case("a@b@c", Err(EmailValidationError::Malformed))]
    fn email_validation(#[case] raw: &str, #[case] expected: Result<&str, EmailValidationError>) {
        let result = Email::new(raw).map(String::from);
        assert_eq!(result, expected.map(str::to_owned));
    }

    #[rstest]
    fn email_rejects_overlong_input() {
        let raw = format!("{}@example.com", "a".repeat(EMAIL_MAX));
        assert_eq!(
            Email::new(raw),
            Err(EmailValidationError::TooLong { max: EMAIL_MAX })
        );
    }

    #[rstest]
    fn user_serialises_to_camel_case_json() {
        let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").expect("valid id");
        let user = User::new(id, Email::new("ada@example.com").expect("valid email"));
        let value = serde_json::to_value(&user).expect("serialise user");
        assert_eq!(
            value,
            serde_json::json!({
                "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
                "email": "ada@example.com",
            })
        );
    }
}
