//! Application state shared across handlers

use std::sync::Arc;

use common::token::TokenService;
use stats::RecordStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Tasks and check-ins; also owns the calendar that defines "today"
    pub store: Arc<dyn RecordStore>,
    pub tokens: TokenService,
}
