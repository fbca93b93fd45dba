//! Rentbook Server — application entry point.

mod config;

use std::sync::Arc;

use chrono::FixedOffset;
use rentbook_api::{build_router, AppState};
use rentbook_auth::AuthService;
use rentbook_db::repository::{SurrealTenantRepository, SurrealUserRepository};
use rentbook_db::DbManager;
use tracing_subscriber::EnvFilter;

use config::ServerConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("rentbook=info".parse()?),
        )
        .json()
        .init();

    tracing::info!("Starting Rentbook server...");

    let config = ServerConfig::from_env()?;

    let manager = DbManager::init(&config.db).await?;

    let db = manager.client().clone();
    let user_repo = match &config.auth.pepper {
        Some(pepper) => SurrealUserRepository::with_pepper(db.clone(), pepper.clone()),
        None => SurrealUserRepository::new(db.clone()),
    };
    let tenant_repo = SurrealTenantRepository::new(db);

    let report_offset = FixedOffset::east_opt(config.utc_offset_minutes * 60)
        .ok_or("RENTBOOK_UTC_OFFSET_MINUTES is out of range")?;

    let state = Arc::new(AppState {
        auth: AuthService::new(user_repo, config.auth.clone()),
        tenants: tenant_repo,
        report_offset,
    });

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "Rentbook server listening");

    axum::serve(listener, app).await?;

    tracing::info!("Rentbook server stopped.");
    Ok(())
}
