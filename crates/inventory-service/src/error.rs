use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::debug;
use validator::{ValidationErrors, ValidationErrorsKind};

use crate::models::ErrorBody;

/// Errors that abort the service before it starts serving
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid port value {value:?}")]
    InvalidPort { value: String },

    #[error("failed to read configuration file {path}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid CORS {kind} {value:?}")]
    InvalidCors { kind: &'static str, value: String },

    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Serve(#[from] std::io::Error),
}

/// Errors surfaced to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body deserialized but broke one or more declared rules
    #[error("validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    /// The body could not be read into the declared shape
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages = Vec::new();
        collect_messages(&errors, None, &mut messages);
        messages.sort();
        Self::Validation(messages)
    }
}

/// Flatten `errors` into one message per failed rule
///
/// Messages of nested fields are prefixed with their dotted path (`inner.qty`,
/// `items[0].qty`); top-level fields keep their message as-is.
fn collect_messages(errors: &ValidationErrors, prefix: Option<&str>, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match prefix {
            Some(prefix) => format!("{}.{}", prefix, field),
            None => field.to_string(),
        };

        match kind {
            ValidationErrorsKind::Field(errs) => {
                for err in errs {
                    let message = match &err.message {
                        Some(message) => message.to_string(),
                        None => format!("{} failed validation: {}", path, err.code),
                    };
                    if prefix.is_some() && err.message.is_some() {
                        out.push(format!("{}: {}", path, message));
                    } else {
                        out.push(message);
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_messages(nested, Some(&path), out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_messages(nested, Some(&format!("{}[{}]", path, index)), out);
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("Rejecting request: {}", self);

        let message = match self {
            Self::Validation(messages) => messages,
            Self::BadRequest(message) => vec![message],
        };
        let status = StatusCode::BAD_REQUEST;

        (
            status,
            Json(ErrorBody {
                status_code: status.as_u16(),
                message,
                error: status
                    .canonical_reason()
                    .unwrap_or("Bad Request")
                    .to_string(),
            }),
        )
            .into_response()
    }
}
