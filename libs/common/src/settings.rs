//! Environment-driven configuration
//!
//! Every service reads its settings from plain environment variables
//! (`DATABASE_URL`, `JWT_SECRET_KEY`, ...). Keys are lower-cased by the
//! `config` crate, so a struct field named `database_url` is filled from
//! `DATABASE_URL`.
//!
//! Values are kept as strings until deserialisation, so a secret such as
//! `007` is never reinterpreted as a number; numeric fields parse their own
//! string at that point.

use config::{Config, ConfigError, Environment};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Load a settings struct from the environment, falling back to `defaults`
/// for keys that are not set.
pub fn from_env<T: DeserializeOwned>(defaults: &[(&str, &str)]) -> Result<T, ConfigError> {
    let mut builder = Config::builder();
    for (key, value) in defaults {
        builder = builder.set_default(*key, *value)?;
    }

    builder
        .add_source(Environment::default())
        .build()?
        .try_deserialize()
}

/// HTTP server settings shared by the services
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    pub bind_address: String,
    /// Fixed UTC offset, in minutes, used for calendar days.
    /// `None` means the server's local offset, sampled once at startup: it
    /// does not follow daylight saving changes, so set this in zones that
    /// observe DST.
    #[serde(default)]
    pub utc_offset_minutes: Option<i32>,
}

impl ServerConfig {
    /// Create a new ServerConfig from environment variables
    ///
    /// # Environment Variables
    /// - `BIND_ADDRESS`: listen address (default: `default_bind`)
    /// - `UTC_OFFSET_MINUTES`: calendar zone offset (default: server local
    ///   offset at startup, which a restart is needed to refresh after a DST
    ///   change)
    pub fn from_env(default_bind: &str) -> Result<Self, ConfigError> {
        from_env(&[("bind_address", default_bind)])
    }
}
