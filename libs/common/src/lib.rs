//! Common library for the NeNe habit tracker
//!
//! This crate provides shared functionality used across the services:
//! database connectivity and migrations, error types, environment
//! configuration, cross-origin policy, logging setup and access tokens.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let is_healthy = health_check(&pool).await?;
//!     println!("Database health check: {}", is_healthy);
//!     Ok(())
//! }
//! ```

pub mod cors;
pub mod database;
pub mod error;
pub mod settings;
pub mod telemetry;
pub mod token;
