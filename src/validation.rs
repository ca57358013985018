//! Field checks for incoming user request shapes.
//!
//! Each request shape has one `validate` function that collects every failing
//! field in declaration order. Nothing is mutated until validation passes.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::domain::{UserCreate, UserPatch};

pub const FIRST_NAME_REQUIRED: &str = "First Name can't be null";
pub const LAST_NAME_REQUIRED: &str = "Last Name can't be null";
pub const EMAIL_REQUIRED: &str = "Email can't be null";
pub const EMAIL_MALFORMED: &str = "must be a well-formed email address";
pub const PASSWORD_REQUIRED: &str = "Password can't be null";
pub const PASSWORD_LENGTH: &str =
    "Password can't be less than 8 characters and more than 12 characters.";

pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 12;

/// Dot-separated atoms before the `@`; atoms may hold non-ASCII characters.
static EMAIL_PATTERN: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{0080}-\x{FFFF}-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~\x{0080}-\x{FFFF}-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("Invalid Regex")
});

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every rejected field of one request, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &str, message: &str) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[FieldError] {
        &self.0
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
        }
        Ok(())
    }
}

/// Body of a create request before validation. Absent fields stay `None`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body of an update request before validation. Extra fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// An empty string is accepted here; only absence is caught by the null check.
pub fn is_well_formed_email(email: &str) -> bool {
    email.is_empty() || EMAIL_PATTERN.is_match(email)
}

fn password_length_ok(password: &str) -> bool {
    (PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&password.chars().count())
}

impl CreateUserRequest {
    /// Checks every field and returns the store parameters. The password is
    /// consumed here and not carried further.
    pub fn validate(self) -> Result<UserCreate, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.first_name.is_none() {
            errors.push("firstName", FIRST_NAME_REQUIRED);
        }
        if self.last_name.is_none() {
            errors.push("lastName", LAST_NAME_REQUIRED);
        }
        match &self.email {
            None => errors.push("email", EMAIL_REQUIRED),
            Some(email) if !is_well_formed_email(email) => errors.push("email", EMAIL_MALFORMED),
            Some(_) => {}
        }
        match &self.password {
            None => errors.push("password", PASSWORD_REQUIRED),
            Some(password) if !password_length_ok(password) => {
                errors.push("password", PASSWORD_LENGTH);
            }
            Some(_) => {}
        }

        errors.into_result(|| UserCreate {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        })
    }
}

impl UpdateUserRequest {
    pub fn validate(self) -> Result<UserPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if self.first_name.is_none() {
            errors.push("firstName", FIRST_NAME_REQUIRED);
        }
        if self.last_name.is_none() {
            errors.push("lastName", LAST_NAME_REQUIRED);
        }

        errors.into_result(|| UserPatch {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
        })
    }
}
