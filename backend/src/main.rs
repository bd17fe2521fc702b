//! Attendance server entry-point: loads settings, prepares the record
//! store, and serves the `/api` routes.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use attendance::inbound::http::health::HealthState;
use attendance::outbound::persistence::{DbPool, PoolConfig, apply_migrations};
use attendance::settings::AppSettings;

use server::{ServerConfig, create_server};

fn init_tracing() {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }
}

async fn connect_database(settings: &AppSettings, url: &str) -> Result<DbPool> {
    let migration_url = url.to_owned();
    web::block(move || apply_migrations(&migration_url))
        .await
        .wrap_err("migration task failed")?
        .wrap_err("failed to apply database migrations")?;

    let config = PoolConfig::new(url).with_max_size(settings.db_max_connections());
    DbPool::new(config)
        .await
        .wrap_err("failed to build database pool")
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let settings = AppSettings::load().map_err(|err| eyre!("failed to load settings: {err}"))?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err_with(|| format!("invalid bind host {:?}", settings.bind_host()))?;

    let mut config = ServerConfig::new(bind_addr)
        .with_policy(settings.redemption_policy())
        .with_seed_roster(settings.seed_roster());
    match settings.database_url() {
        Some(url) => {
            let pool = connect_database(&settings, url).await?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; records are held in memory only"),
    }

    let health_state = web::Data::new(HealthState::new(config.store_backend()));
    let server = create_server(health_state, config).await?;
    info!(%bind_addr, "attendance server listening");
    server.await?;
    Ok(())
}
