use std::sync::Arc;

use finanal::database::{create_database_connection, run_migrations};
use finanal::store::{MemoryRecordStore, PgRecordStore, RecordStore};
use finanal::{create_app, AppConfig, AppState};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let records: Arc<dyn RecordStore> = match &config.database_url {
        Some(database_url) => {
            let pool = match create_database_connection(database_url, &config).await {
                Ok(pool) => pool,
                Err(e) => {
                    error!("Failed to connect to database: {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = run_migrations(&pool).await {
                error!("Failed to run migrations: {}", e);
                std::process::exit(1);
            }

            Arc::new(PgRecordStore::new(pool))
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory only");
            Arc::new(MemoryRecordStore::new())
        }
    };

    let app = create_app(AppState::new(records), &config);

    let listener = match tokio::net::TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    info!("Server running at http://{}", config.bind_addr);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
