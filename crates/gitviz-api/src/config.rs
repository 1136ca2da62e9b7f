// Environment configuration

use anyhow::{Context, Result};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Server configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared secret GitHub signs payloads with
    pub hub_secret: String,
    /// Postgres connection string
    pub database_url: String,
    /// Listen address
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let hub_secret =
            std::env::var("X_HUB_SECRET").context("X_HUB_SECRET environment variable required")?;
        let database_url = std::env::var("DATABASE_URL")
            .context("DATABASE_URL environment variable required")?;
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            hub_secret,
            database_url,
            bind_addr,
        })
    }
}
