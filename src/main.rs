//! Account Service
//!
//! Connects to the configured database and brings the user schema up to date.
//! Reads configuration from TOML file (~/.config/account-service/config.toml).

use std::path::PathBuf;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info};

use account_service::infrastructure::database::migrator::Migrator;
use account_service::logging::init_tracing;
use account_service::{default_config_path, init_database, AppConfig, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ACCOUNT_SERVICE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());

    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            init_tracing(&cfg.logging);
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            let cfg = AppConfig {
                database: DatabaseConfig::from_env(),
                ..AppConfig::default()
            };
            init_tracing(&cfg.logging);
            error!("Failed to load config: {}. Using defaults and DATABASE_URL.", e);
            cfg
        }
    };

    info!("Starting account service...");

    // ── Database ───────────────────────────────────────────────
    let db = match init_database(&app_cfg.database).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    info!("Account service ready");
    Ok(())
}
