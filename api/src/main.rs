use std::sync::Arc;

use actix_web::{web, HttpServer};
use anyhow::Context;
use log::info;

use parley_api::{create_app, AppState};
use parley_core::repositories::InMemoryTokenRegistry;
use parley_core::services::{
    TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
use parley_infra::{BcryptPasswordHasher, InMemoryUserRepository};
use parley_shared::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Reads .env first; a missing JWT_SECRET stops startup here
    let config = AppConfig::from_env().context("failed to load configuration")?;

    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(config.logging.filter.clone()),
    );

    info!("Starting Parley API Server");
    info!(
        "Environment: {}, access token ttl: {}s, refresh token ttl: {}s, issuer: {}",
        config.environment,
        config.auth.jwt.access_token_expiry,
        config.auth.jwt.refresh_token_expiry,
        config.auth.jwt.issuer
    );

    let registry = Arc::new(InMemoryTokenRegistry::new());
    let token_service = Arc::new(TokenService::new(
        Arc::clone(&registry),
        TokenServiceConfig::from(&config.auth.jwt),
    ));

    let cleanup = Arc::new(TokenCleanupService::new(
        registry,
        TokenCleanupConfig::from(&config.auth.sweep),
    ));
    let _sweeper = cleanup.start_background_task();

    let state = web::Data::new(AppState::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(BcryptPasswordHasher::default()),
        token_service,
    ));

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    let cors = config.cors.clone();
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    Ok(())
}
