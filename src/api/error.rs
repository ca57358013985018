use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

use super::format::{push_element, push_parent, Format, ToXml};
use crate::user_actor::UserError;
use crate::validation::{FieldError, ValidationErrors};

/// What went wrong while serving a request.
#[derive(Debug, Error)]
pub enum ApiErrorKind {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Malformed query string: {0}")]
    MalformedQuery(String),
    #[error("Unsupported content type: '{0}'")]
    UnsupportedMediaType(String),
    #[error("No acceptable representation")]
    NotAcceptable,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for ApiErrorKind {
    fn from(e: UserError) -> Self {
        match e {
            UserError::Validation(errors) => Self::Validation(errors),
            UserError::NotFound(_) => Self::NotFound(e.to_string()),
            UserError::ActorCommunicationError(_) => Self::Internal(e.to_string()),
        }
    }
}

/// An [`ApiErrorKind`] paired with the format its body is rendered in.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ApiError {
    kind: ApiErrorKind,
    format: Format,
}

impl ApiError {
    pub const fn new(kind: ApiErrorKind, format: Format) -> Self {
        Self { kind, format }
    }
}

/// Attaches the negotiated response format to a failed result.
pub trait InFormat<T> {
    /// # Errors
    ///
    /// * If `self` is an error
    fn in_format(self, format: Format) -> Result<T, ApiError>;
}

impl<T, E: Into<ApiErrorKind>> InFormat<T> for Result<T, E> {
    fn in_format(self, format: Format) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::new(e.into(), format))
    }
}

/// Error body. `errors` is present for validation failures, `message`
/// otherwise.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody<'a> {
    status: u16,
    error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<&'a [FieldError]>,
}

impl ToXml for ErrorBody<'_> {
    fn to_xml(&self) -> String {
        let mut out = String::new();
        push_parent(&mut out, "ErrorResponse", |out| {
            push_element(out, "status", &self.status.to_string());
            push_element(out, "error", self.error);
            if let Some(message) = &self.message {
                push_element(out, "message", message);
            }
            if let Some(errors) = self.errors {
                push_parent(out, "errors", |out| {
                    for field_error in errors {
                        push_parent(out, "fieldError", |out| {
                            push_element(out, "field", &field_error.field);
                            push_element(out, "message", &field_error.message);
                        });
                    }
                });
            }
        });
        out
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::Validation(_)
            | ApiErrorKind::MalformedBody(_)
            | ApiErrorKind::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ApiErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ApiErrorKind::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiErrorKind::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
            ApiErrorKind::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Request failed");
        } else {
            debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = match &self.kind {
            ApiErrorKind::Validation(errors) => ErrorBody {
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or_default(),
                message: None,
                errors: Some(errors.fields()),
            },
            other => ErrorBody {
                status: status.as_u16(),
                error: status.canonical_reason().unwrap_or_default(),
                message: Some(other.to_string()),
                errors: None,
            },
        };

        self.format.respond(HttpResponse::build(status), &body)
    }
}
