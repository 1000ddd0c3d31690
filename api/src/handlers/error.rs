//! Mapping from domain results to HTTP responses

use actix_web::{error::JsonPayloadError, http::StatusCode, HttpRequest, HttpResponse};
use std::collections::HashMap;
use validator::ValidationErrors;

use lh_core::domain::value_objects::VerifyOutcome;
use lh_core::errors::{AuthError, DomainError, ValidationError};
use lh_shared::error_codes;

use crate::dto::ErrorResponse;

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::RateLimitExceeded { seconds } => HttpResponse::TooManyRequests()
                .insert_header(("Retry-After", seconds.to_string()))
                .json(
                    ErrorResponse::new(
                        error.code(),
                        format!("Too many requests. Please try again in {} seconds", seconds),
                    )
                    .add_detail("retry_after", seconds),
                ),
            AuthError::MailServiceFailure => HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error.code(),
                "Mail service is temporarily unavailable. Please try again later",
            )),
        },
        DomainError::Validation(validation_error) => match validation_error {
            ValidationError::RequiredField { field } => HttpResponse::BadRequest().json(
                ErrorResponse::new(error.code(), format!("Field required: {}", field))
                    .add_detail("field", field),
            ),
            ValidationError::InvalidEmail => HttpResponse::BadRequest()
                .json(ErrorResponse::new(error.code(), "Invalid email address")),
        },
    }
}

/// Error code and message for a failed verification outcome
///
/// Returns `None` for [`VerifyOutcome::Verified`].
pub fn outcome_error(outcome: VerifyOutcome) -> Option<(&'static str, &'static str)> {
    match outcome {
        VerifyOutcome::Verified => None,
        VerifyOutcome::InvalidFormat => Some((
            error_codes::INVALID_CODE_FORMAT,
            "Verification code must be exactly 6 characters",
        )),
        VerifyOutcome::NotFound => Some((
            error_codes::CODE_NOT_FOUND,
            "No verification code was requested for this email",
        )),
        VerifyOutcome::Expired => Some((
            error_codes::CODE_EXPIRED,
            "Verification code has expired. Please request a new one",
        )),
        VerifyOutcome::Mismatch => Some((
            error_codes::CODE_MISMATCH,
            "Verification code is incorrect",
        )),
    }
}

/// Response for a verification attempt that did not succeed
pub fn handle_failed_outcome(outcome: VerifyOutcome) -> HttpResponse {
    match outcome_error(outcome) {
        Some((code, message)) => HttpResponse::BadRequest().json(
            ErrorResponse::new(code, message).add_detail("retryable", outcome.is_retryable()),
        ),
        None => internal_error(),
    }
}

/// Response for a request body that failed `validator` checks
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut field_errors: HashMap<String, Vec<String>> = HashMap::new();

    for (field, errors) in errors.field_errors() {
        let messages = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        field_errors.insert(field.to_string(), messages);
    }

    let code = if field_errors.contains_key("email") {
        error_codes::INVALID_EMAIL
    } else {
        error_codes::VALIDATION_ERROR
    };

    HttpResponse::BadRequest().json(
        ErrorResponse::new(code, "Invalid request data").add_detail("fields", field_errors),
    )
}

/// Turn malformed or oversized JSON bodies into the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected request body");

    let status = match err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            StatusCode::PAYLOAD_TOO_LARGE
        }
        _ => StatusCode::BAD_REQUEST,
    };
    let body = ErrorResponse::new(error_codes::VALIDATION_ERROR, err.to_string());
    actix_web::error::InternalError::from_response(err, HttpResponse::build(status).json(body)).into()
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        "An internal error occurred",
    ))
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
