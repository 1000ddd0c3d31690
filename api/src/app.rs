//! Application routing
//!
//! The binary and the integration tests build their `App` from the same
//! pieces: shared state, [`json_config`] and [`configure`].

use actix_web::web;

use lh_core::services::verification::{Clock, MailServiceTrait};

use crate::handlers::json_error_handler;
use crate::routes::health::health_check;
use crate::routes::verification::{send_code::send_code, verify_code::verify_code};

/// Default JSON body limit in bytes
pub const DEFAULT_MAX_PAYLOAD_SIZE: usize = 16 * 1024;

/// JSON extractor settings with the standard error body
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler)
}

/// Register the health check and the verification API
///
/// The caller supplies `web::Data<AppState<M, K>>` with matching type parameters.
pub fn configure<M, K>(cfg: &mut web::ServiceConfig)
where
    M: MailServiceTrait + 'static,
    K: Clock + 'static,
{
    cfg.route("/health", web::get().to(health_check::<M, K>))
        .service(
            web::scope("/api/v1").service(
                web::scope("/verification")
                    .route("/send-code", web::post().to(send_code::<M, K>))
                    .route("/verify-code", web::post().to(verify_code::<M, K>)),
            ),
        );
}
