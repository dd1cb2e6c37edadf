//! Users service entry-point: loads settings, prepares the SQLite store and
//! serves the REST endpoints.

mod server;

use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, create_server};
use users_service::inbound::http::health::HealthState;
use users_service::inbound::http::state::HttpState;
use users_service::outbound::persistence::{
    DbPool, PoolConfig, SqlxUserRepository, ensure_users_table,
};
use users_service::settings::ServiceSettings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).json().try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServiceSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;

    let pool_config =
        PoolConfig::new(settings.database_url()).with_max_size(settings.max_connections());
    let pool = DbPool::new(pool_config)
        .await
        .map_err(|e| std::io::Error::other(format!("failed to open database: {e}")))?;
    ensure_users_table(&pool)
        .await
        .map_err(std::io::Error::other)?;

    let http_state = HttpState::from_repository(Arc::new(SqlxUserRepository::new(pool)))
        .with_request_timeout(settings.request_timeout());
    let config = ServerConfig::new(bind_addr, http_state)
        .with_read_timeout(settings.read_timeout())
        .with_write_timeout(settings.write_timeout());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "users service listening");
    server.await
}
