use actix_web::{web, HttpResponse};
use validator::Validate;

use lh_core::services::verification::{Clock, MailServiceTrait};
use lh_shared::email::mask_email;

use crate::dto::{SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_domain_error, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/verification/send-code
///
/// Issues a fresh code for the email address and mails it. Any code the
/// address already held is replaced.
///
/// # Request Body
///
/// ```json
/// { "email": "shopper@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "message": "Verification code sent. Please check your email.",
///     "expires_in": 600,
///     "resend_after": 0
/// }
/// ```
///
/// ## Errors
/// - 400 `invalid_email` for a malformed address
/// - 429 `rate_limit_exceeded` while the resend cooldown is active
/// - 503 `mail_service_failure` when the code could not be dispatched
pub async fn send_code<M, K>(
    state: web::Data<AppState<M, K>>,
    request: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    M: MailServiceTrait + 'static,
    K: Clock + 'static,
{
    // Surrounding whitespace is not part of the address
    let mut request = request.into_inner();
    request.email = request.email.trim().to_string();

    if let Err(validation_errors) = request.validate() {
        tracing::warn!(
            recipient = %mask_email(&request.email),
            "Validation failed for send_code request"
        );
        return handle_validation_errors(&validation_errors);
    }

    let service = &state.verification_service;

    match service.send_verification_code(&request.email).await {
        Ok(result) => {
            let now = service.store().now();
            let expires_in = result.expires_at.signed_duration_since(now).num_seconds().max(0);
            let resend_after = result.next_resend_at.signed_duration_since(now).num_seconds().max(0);

            HttpResponse::Ok().json(SendCodeResponse {
                message: "Verification code sent. Please check your email.".to_string(),
                expires_in,
                resend_after,
            })
        }
        Err(error) => {
            tracing::warn!(
                recipient = %mask_email(&request.email),
                error = %error,
                code = error.code(),
                "Failed to send verification code"
            );
            handle_domain_error(&error)
        }
    }
}
