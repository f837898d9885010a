//! Task, check-in and statistics HTTP service.
//!
//! Every `/api` route runs behind [`middleware::auth_middleware`] and reads
//! and writes through the [`stats::RecordStore`] held in [`AppState`].

pub mod error;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::{ApiError, ApiResult};
pub use state::AppState;
