//! Server configuration loaded via OrthoConfig.
//!
//! Sources, lowest precedence first: a `.env` file, `FAQ_*` environment
//! variables, then command-line flags.

use std::ffi::OsString;
use std::time::Duration;

use actix_web::http::header::HeaderValue;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_WORKERS: usize = 1;

/// Invalid or incomplete configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Sources could not be read or merged.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// The allowed cross-origin value is not a usable origin.
    #[error("invalid client origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },
    /// No database URL was configured.
    #[error("FAQ_DATABASE_URL is not set")]
    MissingDatabaseUrl,
}

/// Configuration values for the HTTP service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "FAQ")]
#[serde(default)]
pub struct ServerSettings {
    /// Origin allowed to make cross-origin requests. Unset or `*` allows any.
    pub client_origin: Option<String>,
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 3000)]
    pub port: u16,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_max_size: u32,
    /// Seconds to wait for a database connection.
    #[ortho_config(default = 5)]
    pub connect_timeout_secs: u64,
    /// Worker event loops.
    #[ortho_config(default = 1)]
    pub workers: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            client_origin: None,
            host: None,
            port: DEFAULT_PORT,
            database_url: None,
            pool_max_size: DEFAULT_POOL_MAX_SIZE,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ServerSettings {
    /// Load `.env`, then the environment and the process arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when a source cannot be read or the result
    /// fails validation.
    pub fn load() -> Result<Self, SettingsError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(SettingsError::Load {
                    message: err.to_string(),
                });
            }
        }
        Self::from_args(std::env::args_os())
    }

    /// Load from the environment and the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when parsing or validation fails.
    pub fn from_args<I>(args: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let args: Vec<OsString> = args.into_iter().collect();
        let settings = Self::load_from_iter(args).map_err(|err| SettingsError::Load {
            message: err.to_string(),
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check values that cannot be expressed in the types.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidOrigin`] for an unusable origin.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let Some(origin) = self.allowed_origin() else {
            return Ok(());
        };
        let invalid = |reason: String| SettingsError::InvalidOrigin {
            origin: origin.to_owned(),
            reason,
        };
        let url = Url::parse(origin).map_err(|err| invalid(err.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        HeaderValue::from_str(origin).map_err(|err| invalid(err.to_string()))?;
        Ok(())
    }

    /// Allowed cross-origin value; `None` allows any origin.
    pub fn allowed_origin(&self) -> Option<&str> {
        self.client_origin
            .as_deref()
            .map(|origin| origin.trim().trim_end_matches('/'))
            .filter(|origin| !origin.is_empty() && *origin != "*")
    }

    /// Interface to bind, defaulting to all interfaces.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    /// Port to bind.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Worker count; never less than one event loop.
    pub fn workers(&self) -> usize {
        self.workers.max(1)
    }

    /// Pool configuration for the persistence layer.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingDatabaseUrl`] when no URL is set.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)?;
        Ok(PoolConfig::new(url)
            .with_max_size(self.pool_max_size)
            .with_connection_timeout(Duration::from_secs(self.connect_timeout_secs)))
    }
}
