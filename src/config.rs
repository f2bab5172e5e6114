//! Application configuration loaded from environment variables
//!
//! Variables may also come from a `.env` file, loaded by `main` before this runs.
//!
//! - `HOST` - Bind host (default: `0.0.0.0`)
//! - `PORT` - Bind port (default: `8080`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `RUST_LOG` - Log filter (default: `url_shortener=debug,tower_http=debug`)

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_LOG_FILTER: &str = "url_shortener=debug,tower_http=debug";

/// Service configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST").unwrap_or(defaults.host);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got '{raw}'"))?,
            None => defaults.port,
        };

        let log_format = lookup("LOG_FORMAT")
            .map(|v| v.to_ascii_lowercase())
            .unwrap_or(defaults.log_format);

        Ok(Self {
            host,
            port,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `log_format` is not `text` or `json`, or `host` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.host.trim().is_empty() {
            anyhow::bail!("HOST must not be empty");
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn json_logs(&self) -> bool {
        self.log_format == "json"
    }
}
