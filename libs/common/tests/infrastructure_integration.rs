//! Integration tests for the infrastructure components
//!
//! These tests verify that the PostgreSQL database is reachable and that the
//! embedded migrations produce the tracker schema. They need a running
//! database (`DATABASE_URL`) and are ignored by default.

use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::Row;

#[tokio::test]
#[ignore = "requires a running PostgreSQL instance"]
async fn test_infrastructure_integration() -> Result<(), Box<dyn std::error::Error>> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    assert!(health_check(&pool).await?, "Database health check failed");

    run_migrations(&pool).await?;
    // Migrations are idempotent
    run_migrations(&pool).await?;

    let rows = sqlx::query(
        r#"
        SELECT table_name
        FROM information_schema.tables
        WHERE table_schema = 'public' AND table_name IN ('users', 'tasks', 'checkins')
        ORDER BY table_name
        "#,
    )
    .fetch_all(&pool)
    .await?;

    let tables: Vec<String> = rows.iter().map(|row| row.get("table_name")).collect();
    assert_eq!(tables, vec!["checkins", "tasks", "users"]);

    Ok(())
}
