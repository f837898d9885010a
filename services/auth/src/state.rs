//! Shared handler state

use common::token::TokenService;

use crate::{rate_limiter::RateLimiter, repositories::UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_repository: UserRepository,
    pub tokens: TokenService,
    pub rate_limiter: RateLimiter,
}
