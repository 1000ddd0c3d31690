use actix_web::{web, HttpResponse};
use validator::Validate;

use lh_core::services::verification::{Clock, MailServiceTrait};
use lh_shared::email::mask_email;

use crate::dto::{VerifyCodeRequest, VerifyCodeResponse};
use crate::handlers::{handle_failed_outcome, handle_validation_errors};

use super::AppState;

/// Handler for POST /api/v1/verification/verify-code
///
/// # Request Body
///
/// ```json
/// { "email": "shopper@example.com", "code": "482913" }
/// ```
///
/// A verified code is consumed; submitting it again yields `code_not_found`.
/// A wrong code leaves the pending code in place so the user can retry.
///
/// ## Errors (400)
/// `invalid_code_format`, `code_not_found`, `code_expired`, `code_mismatch`
pub async fn verify_code<M, K>(
    state: web::Data<AppState<M, K>>,
    request: web::Json<VerifyCodeRequest>,
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
            "Validation failed for verify_code request"
        );
        return handle_validation_errors(&validation_errors);
    }

    let outcome = state
        .verification_service
        .verify_code(&request.email, &request.code);

    if outcome.is_verified() {
        HttpResponse::Ok().json(VerifyCodeResponse {
            verified: true,
            message: "Email address verified".to_string(),
        })
    } else {
        handle_failed_outcome(outcome)
    }
}
