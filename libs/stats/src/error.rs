//! Error types for the statistics core

use common::error::DatabaseError;
use thiserror::Error;

/// Errors surfaced by the statistics core
#[derive(Error, Debug)]
pub enum StatsError {
    /// The record store failed to answer a query
    #[error("Record store error: {0}")]
    Store(#[from] DatabaseError),

    /// A task definition the calculators cannot meaningfully evaluate
    #[error("Invalid task configuration: {reason}")]
    InvalidTaskConfiguration { reason: String },
}

impl StatsError {
    pub fn invalid_task(reason: impl Into<String>) -> Self {
        StatsError::InvalidTaskConfiguration {
            reason: reason.into(),
        }
    }
}

/// Type alias for Result with StatsError
pub type StatsResult<T> = Result<T, StatsError>;
