//! Registration and login service.
//!
//! Accounts live in the shared `users` table; a successful login returns a
//! bearer token that the API service accepts.

pub mod error;
pub mod models;
pub mod password;
pub mod rate_limiter;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use error::AuthError;
pub use state::AppState;
