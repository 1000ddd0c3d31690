use actix_web::{web, HttpResponse};
use std::collections::HashMap;

use lh_core::services::verification::{Clock, MailServiceTrait};
use lh_shared::types::{HealthResponse, HealthStatus, ServiceHealth};

use super::AppState;

/// Handler for GET /health
///
/// The mail dispatcher being down degrades the service rather than failing
/// it: codes can still be verified.
pub async fn health_check<M, K>(state: web::Data<AppState<M, K>>) -> HttpResponse
where
    M: MailServiceTrait + 'static,
    K: Clock + 'static,
{
    let service = &state.verification_service;
    let mut components = HashMap::new();

    components.insert(
        "verification_store".to_string(),
        ServiceHealth::healthy(format!("{} pending codes", service.store().len())),
    );

    let mail = if service.mail_available().await {
        ServiceHealth::healthy("available")
    } else {
        ServiceHealth::degraded("mail dispatcher unavailable")
    };
    components.insert("mail".to_string(), mail);

    let response = HealthResponse::from_components("localhunt-api", env!("CARGO_PKG_VERSION"), components);

    match response.status {
        HealthStatus::Unhealthy => HttpResponse::ServiceUnavailable().json(response),
        _ => HttpResponse::Ok().json(response),
    }
}
