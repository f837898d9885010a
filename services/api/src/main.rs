use std::sync::Arc;

use anyhow::{Result, anyhow};
use tracing::{info, warn};

use api::{AppState, repositories::PgRecordStore, routes};
use common::{
    cors::CorsConfig,
    database::{self, DatabaseConfig},
    settings::ServerConfig,
    telemetry,
    token::{TokenConfig, TokenService},
};
use stats::Calendar;

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    info!("Starting API service");

    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    let server_config = ServerConfig::from_env("0.0.0.0:3001")?;
    let calendar = match server_config.utc_offset_minutes {
        Some(minutes) => Calendar::with_offset_minutes(minutes)
            .ok_or_else(|| anyhow!("UTC_OFFSET_MINUTES out of range: {}", minutes))?,
        None => {
            warn!("UTC_OFFSET_MINUTES is not set; the startup local offset will not follow DST changes");
            Calendar::local()
        }
    };
    info!("Calendar days use UTC offset {}", calendar.offset());

    let app_state = AppState {
        store: Arc::new(PgRecordStore::new(pool, calendar)),
        tokens: TokenService::new(TokenConfig::from_env()?),
    };

    let cors = CorsConfig::from_env()?;
    info!("Allowed CORS origins: {}", cors.allowed_origins);
    let app = routes::create_router(app_state, cors.layer()?);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    info!("API service listening on {}", server_config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
