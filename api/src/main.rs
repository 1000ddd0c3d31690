use actix_web::{web, App, HttpServer};
use anyhow::Context;
use chrono::Duration;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use lh_api::app::{configure, json_config};
use lh_api::config;
use lh_api::handlers::not_found;
use lh_api::routes::AppState;
use lh_core::services::verification::{
    SweeperConfig, SystemClock, VerificationCodeStore, VerificationService,
    VerificationServiceConfig, VerificationSweeper,
};
use lh_infra::mail::{create_mail_service, MailService, MailServiceAdapter};

type Mailer = MailServiceAdapter<dyn MailService>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    config::init_tracing(&config.logging)?;

    info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting LocalHunt API Server"
    );

    let mail_service = create_mail_service(&config.mail).context("Failed to create mail service")?;
    info!(provider = mail_service.provider_name(), "Mail service ready");
    let mailer: Arc<Mailer> = Arc::new(MailServiceAdapter::new(mail_service));

    // One store shared by the request handlers and the sweeper
    let store = Arc::new(VerificationCodeStore::new(Duration::minutes(
        config.verification.code_ttl_minutes,
    )));
    let verification_service = Arc::new(VerificationService::with_store(
        mailer,
        store.clone(),
        VerificationServiceConfig::from(&config.verification),
    ));

    let sweeper = Arc::new(VerificationSweeper::new(
        store,
        SweeperConfig::from(&config.verification),
    ));
    let sweeper_handle = sweeper.start_background_task();

    let app_state = web::Data::new(AppState::new(verification_service));
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .app_data(json_config(max_payload_size))
            .wrap(TracingLogger::default())
            .configure(configure::<Mailer, SystemClock>)
            .default_service(web::route().to(not_found))
    })
    .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run()
        .await
        .context("Server error")?;

    if let Some(handle) = sweeper_handle {
        handle.abort();
    }

    info!("LocalHunt API Server stopped");
    Ok(())
}
