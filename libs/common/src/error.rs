//! Custom error types for the common library
//!
//! This module defines application-specific error types that can be used
//! throughout the application.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Whether the failure was a unique constraint violation (e.g. a taken username)
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DatabaseError::Query(err) => err
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation()),
            _ => false,
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

/// Error type for access token handling
#[derive(Error, Debug)]
pub enum TokenError {
    /// Token settings are missing or unusable
    #[error("Token configuration error: {0}")]
    Configuration(String),

    /// Token could not be encoded, decoded or validated
    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}
