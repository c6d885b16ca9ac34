//! Token service entry point.

use anyhow::Context;
use auth_token::http;
use auth_token::jwt::HmacSigner;
use auth_token::refresh::HashedCredentialStore;
use auth_token::shutdown::shutdown_signal;
use auth_token::storage::{MongoUserRepository, mongo};
use auth_token::{AuthOrchestrator, Config, TokenPolicy};
use rust_common::{TracingConfig, init_tracing};
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("loading configuration")?;

    init_tracing(
        &TracingConfig::default()
            .with_service_name(env!("CARGO_PKG_NAME"))
            .with_log_level(config.log_level.as_str())
            .with_json_output(config.log_json),
    )?;

    info!(
        algorithm = config.jwt_algorithm.as_str(),
        rotation_mode = %config.rotation_mode,
        database = %config.mongo_db,
        "Starting token service"
    );

    let database = mongo::connect(config.mongo_uri.expose_secret(), &config.mongo_db)
        .await
        .context("connecting to MongoDB")?;
    let repository = MongoUserRepository::new(&database);
    repository.ensure_indexes().await.context("creating indexes")?;

    let service = AuthOrchestrator::new(
        HmacSigner::new(config.jwt_secret.expose_secret().as_bytes(), config.jwt_algorithm),
        HashedCredentialStore::with_timeout(repository, config.store_timeout),
        TokenPolicy::from(&config),
    );

    let listener = TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("binding {}", config.listen_addr()))?;
    info!(addr = %listener.local_addr()?, "Token service listening");

    axum::serve(listener, http::router(Arc::new(service)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Token service stopped");
    Ok(())
}
