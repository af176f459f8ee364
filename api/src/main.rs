use actix_web::{web, HttpServer};
use log::{info, warn};
use std::sync::Arc;

use sv_api::app::{build_verification_service, create_app};
use sv_api::routes::verification::AppState;
use sv_shared::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .format_module_path(config.logging.module_path)
    .init();

    info!("Starting SiteVerify API Server ({})", config.environment);

    let service = build_verification_service(&config);

    if service.has_sms_provider() {
        info!("SMS provider configured: {:?}", config.sms.provider);
    } else if config.environment.is_production() {
        warn!("No SMS provider configured in production; codes will only be logged");
    } else {
        info!("No SMS provider configured; issuing codes in mock mode");
    }

    let app_state = web::Data::new(AppState {
        verification_service: Arc::new(service),
    });

    let environment = config.environment;
    let server_config = config.server.clone();
    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let mut server = HttpServer::new(move || {
        create_app(app_state.clone(), environment, &server_config)
    });

    // Zero keeps the actix default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await
}
