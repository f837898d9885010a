use anyhow::Result;
use tracing::info;

use auth::{
    AppState,
    rate_limiter::{RateLimiter, RateLimiterConfig},
    repositories::UserRepository,
    routes,
};
use common::{
    cors::CorsConfig,
    database::{self, DatabaseConfig},
    settings::ServerConfig,
    telemetry,
    token::{TokenConfig, TokenService},
};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init();

    info!("Starting authentication service");

    let db_config = DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    let tokens = TokenService::new(TokenConfig::from_env()?);
    let server_config = ServerConfig::from_env("0.0.0.0:3000")?;

    let app_state = AppState {
        user_repository: UserRepository::new(pool),
        tokens,
        rate_limiter: RateLimiter::new(RateLimiterConfig::default()),
    };

    let cors = CorsConfig::from_env()?;
    info!("Allowed CORS origins: {}", cors.allowed_origins);
    let app = routes::create_router(app_state, cors.layer()?);

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address).await?;
    info!(
        "Authentication service listening on {}",
        server_config.bind_address
    );

    axum::serve(listener, app).await?;

    Ok(())
}
