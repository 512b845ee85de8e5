//! API server configuration

use anyhow::Result;
use serde::Deserialize;

/// Cost API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Bind address for the HTTP server
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl ApiConfig {
    /// Load configuration from the environment (COST_API_* variables)
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("COST_API"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ApiConfig {
            bind_address: default_bind_address(),
            port: default_port(),
        }))
    }
}
