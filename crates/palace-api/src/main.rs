//! Memory Palace Builder API server entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use palace_api::config::ApiConfig;
use palace_api::error::AppError;
use palace_api::session::SessionRegistry;
use palace_api::state::{AppState, Gateways, Stores};
use palace_api::{server, telemetry};
use palace_core::clock::SystemClock;
use palace_gateways::{
    GeminiConfig, GeminiSceneGenerator, GoogleTranslator, IdentityConfig, IdentityToolkitGateway,
    TranslateConfig,
};
use palace_store::pg_palace_repository::PgPalaceRepository;
use palace_store::pg_profile_repository::PgProfileRepository;
use sqlx::postgres::PgPoolOptions;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let config = ApiConfig::from_env()?;
    let tracer_provider = telemetry::init(config.otlp_endpoint.as_deref())?;

    info!(config = ?config, "starting Memory Palace Builder API server");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    info!("running database migrations");
    sqlx::migrate!("../../migrations").run(&pool).await?;

    let gateways = Gateways {
        identity: Arc::new(IdentityToolkitGateway::with_base_url(
            IdentityConfig::new(config.identity_api_key.clone()),
            config.identity_base_url.clone(),
        )?),
        generator: Arc::new(GeminiSceneGenerator::with_base_url(
            GeminiConfig {
                api_key: config.gemini_api_key.clone(),
                model: config.gemini_model.clone(),
                timeout: config.generation_timeout,
            },
            config.gemini_base_url.clone(),
        )?),
        translator: Arc::new(GoogleTranslator::with_base_url(
            TranslateConfig::new(config.translate_api_key.clone()),
            config.translate_base_url.clone(),
        )?),
    };
    let stores = Stores {
        profiles: Arc::new(PgProfileRepository::new(pool.clone())),
        palaces: Arc::new(PgPalaceRepository::new(pool)),
    };
    let catalog = config.catalog();
    info!(
        languages = catalog.languages().len(),
        avatars = catalog.avatars().len(),
        "catalog loaded"
    );

    let state = AppState::new(
        Arc::new(SystemClock),
        gateways,
        stores,
        catalog,
        SessionRegistry::new(config.session_ttl),
    );
    let app = server::app(state, server::cors_layer(&config.cors_allowed_origins)?);

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))?;
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = tracer_provider
        && let Err(e) = provider.shutdown()
    {
        warn!(error = %e, "tracer provider did not shut down cleanly");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
