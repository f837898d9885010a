//! Cross-origin policy for the browser client
//!
//! The web frontend is served from its own origin and calls both services,
//! so each router is wrapped in the same [`CorsLayer`].

use axum::http::{HeaderValue, Method, header};
use config::ConfigError;
use serde::Deserialize;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::settings;

/// CORS configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of origins, or `*` for any origin
    #[serde(rename = "cors_allowed_origins")]
    pub allowed_origins: String,
}

impl CorsConfig {
    /// Create a new CorsConfig from environment variables
    ///
    /// # Environment Variables
    /// - `CORS_ALLOWED_ORIGINS`: e.g. `https://app.example.com,http://localhost:8080`
    ///   (default: `*`)
    pub fn from_env() -> Result<Self, ConfigError> {
        settings::from_env(&[("cors_allowed_origins", "*")])
    }

    /// Build the layer; fails when an origin is not a valid header value
    pub fn layer(&self) -> Result<CorsLayer, ConfigError> {
        let allowed = self.allowed_origins.trim();

        let origin = if allowed == "*" {
            AllowOrigin::any()
        } else {
            let origins = allowed
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(|origin| {
                    HeaderValue::from_str(origin).map_err(|e| {
                        ConfigError::Message(format!("Invalid CORS origin {:?}: {}", origin, e))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            AllowOrigin::list(origins)
        };

        Ok(CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]))
    }
}
