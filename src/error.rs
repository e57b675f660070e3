//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! It centralizes error management, providing a consistent way to handle and represent
//! the failure classes of the API: authentication, malformed input, field validation,
//! duplicate registration, missing resources and internal failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to seamlessly convert
//! application errors into appropriate HTTP responses with JSON bodies.
//! It also provides `From` trait implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `bcrypt::BcryptError` and actix's `BlockingError`,
//! allowing for easy conversion using the `?` operator.

use actix_web::{
    dev::ServiceResponse,
    error::{BlockingError, ResponseError},
    http::StatusCode,
    middleware::ErrorHandlerResponse,
    HttpResponse,
};
use heck::ToLowerCamelCase;
use serde::Serialize;
use serde_json::json;
use validator::ValidationErrors;

/// A single field-level validation failure, reported to clients as `{field, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to a specific failure class. These errors are converted
/// into HTTP responses by the `ResponseError` implementation below.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The caller is not authenticated (HTTP 401): missing, invalid or expired token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    /// Malformed request or invalid query parameters (HTTP 400).
    #[error("Bad Request: {0}")]
    BadRequest(String),
    /// One or more body fields failed validation (HTTP 400).
    /// All violations are collected rather than failing on the first one.
    #[error("Validation Error: {0:?}")]
    Validation(Vec<FieldError>),
    /// A registration collided with an existing account.
    /// Reported as HTTP 400 to keep the observed API contract.
    #[error("Conflict: {0}")]
    Conflict(String),
    /// Login failed. Deliberately identical for unknown email and wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,
    /// The requested resource does not exist or is not visible to the caller (HTTP 404).
    #[error("Not Found: {0}")]
    NotFound(String),
    /// An unexpected server-side error (HTTP 500).
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
    /// An error originating from the store (HTTP 500).
    #[error("Database Error: {0}")]
    DatabaseError(String),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_)
            | AppError::Validation(_)
            | AppError::Conflict(_)
            | AppError::InvalidCredentials => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Internal details are logged and replaced by a generic message in the body.
    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::NotFound(msg) => response.json(json!({ "error": msg })),
            AppError::InvalidCredentials => response.json(json!({ "error": "Invalid credentials" })),
            AppError::Validation(errors) => response.json(json!({ "errors": errors })),
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                log::error!("{}", msg);
                response.json(json!({ "error": "Internal server error" }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        AppError::DatabaseError(error.to_string())
    }
}

/// Converts `validator::ValidationErrors` into `AppError::Validation`.
///
/// Field names are reported the way clients send them (camelCase) and the list is
/// sorted by field so responses are stable.
impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> AppError {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {}", field));
                    FieldError::new(field.to_lower_camel_case(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        fields.dedup();
        AppError::Validation(fields)
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(format!("Password hashing failed: {}", error))
    }
}

impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}

/// Error handler installed outside production: rewrites 500 responses so the body
/// carries the underlying error text under `details`.
pub fn expose_internal_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let details = res.response().error().map(|err| err.to_string());
    let (req, res) = res.into_parts();
    let body = json!({
        "error": "Internal server error",
        "details": details,
    });
    let res = HttpResponse::build(res.status()).json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, res).map_into_right_body(),
    ))
}
